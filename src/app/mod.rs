//! App layer - the book screen's state and the actor that drives it
//!
//! The App actor owns the collection, search, sort and form state. It turns
//! key events and network responses into state changes and REST commands.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
