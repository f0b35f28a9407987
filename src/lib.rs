//! # Bookshelf TUI
//!
//! A terminal inventory manager for a remote book catalog.
//!
//! ## Features
//! - List the full collection from the REST endpoint
//! - Search by title or author (case- and accent-insensitive)
//! - Sort by title or author with Spanish collation
//! - Create, edit and delete books (delete asks for confirmation)
//! - Single error banner, re-fetch after every change
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (book screen state)
//! - Network Layer (Tokio runtime + reqwest)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::AppConfig;
pub use error::{BookError, ConfigError};
pub use messages::{NetworkCommand, NetworkResponse, Operation, RenderState, UiEvent};
pub use models::{Book, BookDraft, BookForm, BookId, FormMode, SortKey};
pub use network::{BooksClient, NetworkActor};
pub use view::derive_view;
