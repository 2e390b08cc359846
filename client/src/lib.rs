//! Presentation core for a six-seat card table: fetch the authoritative
//! state, rotate it around the viewer's seat, assemble a display-ready
//! payload, and hand it to a renderer once per poll cycle.

pub mod error;
pub mod fetch;
pub mod lobby;
pub mod poll;
pub mod render;
pub mod rotation;
pub mod view;

pub use error::ViewError;
pub use fetch::Client;
pub use poll::PollDriver;
pub use render::{Renderer, TermRenderer};
pub use view::{assemble, RenderPayload};
