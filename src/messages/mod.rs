//! Messages passed between the UI loop, the app actor and the network actor.
//!
//! Key presses become `UiEvent`s, REST calls travel as `NetworkCommand`s and
//! come back as `NetworkResponse`s, and each state change is published as a
//! `RenderState` snapshot.

pub mod network;
pub mod render;
pub mod ui_events;

pub use network::{NetworkCommand, NetworkResponse, Operation};
pub use render::{FormView, RenderState};
pub use ui_events::UiEvent;
