//! Controller layer: the board context, UI events, and the three handlers.

pub mod context;
pub mod events;
pub mod orchestration;
pub mod render;
pub mod roster;
pub mod signup;

pub use context::BoardContext;
pub use events::UiEvent;
