//! Network messages - communication between App and Network layers

use crate::constants::{MSG_DELETE_FAILED, MSG_LOAD_FAILED, MSG_SAVE_FAILED};
use crate::error::BookError;
use crate::models::{Book, BookDraft, BookId};

/// Which REST operation a message refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Banner text when this operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Load => MSG_LOAD_FAILED,
            Operation::Create | Operation::Update => MSG_SAVE_FAILED,
            Operation::Delete => MSG_DELETE_FAILED,
        }
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// GET the full collection
    FetchBooks { id: u64 },
    /// POST a new book
    CreateBook { id: u64, draft: BookDraft },
    /// PUT an existing book
    UpdateBook {
        id: u64,
        book_id: BookId,
        draft: BookDraft,
    },
    /// DELETE a book
    DeleteBook { id: u64, book_id: BookId },

    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            NetworkCommand::FetchBooks { .. } => Some(Operation::Load),
            NetworkCommand::CreateBook { .. } => Some(Operation::Create),
            NetworkCommand::UpdateBook { .. } => Some(Operation::Update),
            NetworkCommand::DeleteBook { .. } => Some(Operation::Delete),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// Collection fetched
    BooksLoaded { id: u64, books: Vec<Book> },
    /// Create or update accepted
    Saved { id: u64 },
    /// Delete accepted
    Deleted { id: u64 },
    /// Any operation failed
    Failed {
        id: u64,
        operation: Operation,
        error: BookError,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::BooksLoaded { id, .. } => *id,
            NetworkResponse::Saved { id } => *id,
            NetworkResponse::Deleted { id } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
