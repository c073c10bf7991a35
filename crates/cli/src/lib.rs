//! Code Insight terminal client
//!
//! One subcommand per screen of the web client: upload, selection and
//! generation, documentation viewer, evaluation, feedback and chat.

pub mod commands;
pub mod context;
pub mod notify;
pub mod progress;
pub mod render;

pub use context::{AppContext, GlobalArgs};
