//! Network layer - REST calls against the book collection endpoint
//!
//! The Network actor receives book commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::BooksClient;
