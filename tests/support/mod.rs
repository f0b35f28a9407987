//! In-process stand-in for the book inventory API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A request as the server saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    books: Vec<Value>,
    requests: Vec<Recorded>,
    fail_with: Option<StatusCode>,
    raw_list_body: Option<String>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockApi {
    pub fn with_books(books: Vec<Value>) -> Self {
        let api = MockApi::default();
        api.inner.lock().unwrap().books = books;
        api
    }

    /// Answer every request with `status`
    pub fn fail_with(&self, status: StatusCode) {
        self.inner.lock().unwrap().fail_with = Some(status);
    }

    /// Answer the list endpoint with a raw 200 body
    pub fn list_body(&self, body: &str) {
        self.inner.lock().unwrap().raw_list_body = Some(body.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn books(&self) -> Vec<Value> {
        self.inner.lock().unwrap().books.clone()
    }

    /// Serve on a random local port; returns the collection base URL
    pub async fn serve(&self) -> Url {
        let app = Router::new()
            .route("/api/books/get", get(list))
            .route("/api/books/create", post(create))
            .route("/api/books/update/:id", put(update))
            .route("/api/books/delete/:id", delete(remove))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Url::parse(&format!("http://{}/api/books", addr)).unwrap()
    }

    fn record(
        &self,
        method: &'static str,
        path: String,
        body: Option<Value>,
    ) -> Option<StatusCode> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(Recorded { method, path, body });
        inner.fail_with
    }
}

/// A base URL where nothing is listening
pub async fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/api/books", addr)).unwrap()
}

fn failure(status: StatusCode) -> Response {
    (status, Json(json!({ "error": "boom" }))).into_response()
}

async fn list(State(api): State<MockApi>) -> Response {
    if let Some(status) = api.record("GET", "/get".into(), None) {
        return failure(status);
    }
    let inner = api.inner.lock().unwrap();
    if let Some(raw) = &inner.raw_list_body {
        return (StatusCode::OK, raw.clone()).into_response();
    }
    Json(json!({ "books": inner.books })).into_response()
}

async fn create(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    if let Some(status) = api.record("POST", "/create".into(), Some(body.clone())) {
        return failure(status);
    }
    let mut inner = api.inner.lock().unwrap();
    inner.next_id += 1;
    let mut book = body;
    book["_id"] = json!(format!("new-{}", inner.next_id));
    inner.books.push(book.clone());
    (StatusCode::CREATED, Json(json!({ "book": book }))).into_response()
}

async fn update(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(status) = api.record("PUT", format!("/update/{}", id), Some(body.clone())) {
        return failure(status);
    }
    let mut inner = api.inner.lock().unwrap();
    match inner.books.iter_mut().find(|b| b["_id"] == json!(id)) {
        Some(book) => {
            for key in ["title", "author", "price", "stock"] {
                book[key] = body[key].clone();
            }
            Json(json!({ "book": book })).into_response()
        }
        None => failure(StatusCode::NOT_FOUND),
    }
}

async fn remove(State(api): State<MockApi>, Path(id): Path<String>) -> Response {
    if let Some(status) = api.record("DELETE", format!("/delete/{}", id), None) {
        return failure(status);
    }
    let mut inner = api.inner.lock().unwrap();
    let before = inner.books.len();
    inner.books.retain(|b| b["_id"] != json!(id));
    if inner.books.len() == before {
        failure(StatusCode::NOT_FOUND)
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
