//! Typed endpoints of the Code Insight API, one module per resource.
//!
//! Each module adds methods to [`ApiClient`](crate::ApiClient). Upload,
//! documentation fetch, evaluation and generate go through the retry path;
//! everything else fails on the first error.

pub mod auth;
pub mod chat;
pub mod documentation;
pub mod evaluation;
pub mod feedback;
pub mod files;
pub mod generation;
pub mod settings;
pub mod upload;

use serde::Deserialize;

/// `{ "message": ... }` acknowledgement returned by the mutating endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

pub use upload::UploadResponse;
