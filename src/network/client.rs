//! HTTP client for the book collection endpoint

use std::time::Duration;

use reqwest::{Response, Url};

use crate::error::BookError;
use crate::models::{Book, BookDraft, BookId, BookList};

/// Client for the four REST operations of the collection endpoint
#[derive(Clone, Debug)]
pub struct BooksClient {
    http: reqwest::Client,
    base: Url,
}

impl BooksClient {
    pub fn new(base: Url, timeout: Duration) -> Self {
        BooksClient {
            http: create_client(timeout),
            base,
        }
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so an id can never escape its slot. Empty and dot segments are refused:
    /// URL normalization would drop them, even percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BookError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(BookError::Transport(format!("invalid path segment {:?}", bad)));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BookError::Transport(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `/get`
    pub async fn list(&self) -> Result<Vec<Book>, BookError> {
        let url = self.endpoint(&["get"])?;
        let resp = ensure_success(self.http.get(url).send().await?)?;
        let list: BookList = resp.json().await?;
        Ok(list.books)
    }

    /// POST `/create`
    pub async fn create(&self, draft: &BookDraft) -> Result<(), BookError> {
        let url = self.endpoint(&["create"])?;
        ensure_success(self.http.post(url).json(draft).send().await?)?;
        Ok(())
    }

    /// PUT `/update/{id}`
    pub async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<(), BookError> {
        let url = self.endpoint(&["update", id.as_str()])?;
        ensure_success(self.http.put(url).json(draft).send().await?)?;
        Ok(())
    }

    /// DELETE `/delete/{id}`
    pub async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let url = self.endpoint(&["delete", id.as_str()])?;
        ensure_success(self.http.delete(url).send().await?)?;
        Ok(())
    }
}

/// Any non-2xx status is a failure, whatever the code
fn ensure_success(resp: Response) -> Result<Response, BookError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(BookError::Request(status.as_u16()))
    }
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
