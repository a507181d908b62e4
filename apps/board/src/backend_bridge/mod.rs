//! Bridge between the front end's command queue and the handlers.

pub mod commands;
pub mod runtime;
