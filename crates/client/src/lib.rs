//! Typed client for the Code Insight HTTP API.
//!
//! - [`ApiClient`]: transport, error normalization and the endpoint methods
//! - [`GenerationPoller`]: status polling for generation jobs
//! - [`AuthContext`]: session token and current user
//! - [`collect_project_files`]: local directory walk for uploads

pub mod api;
pub mod auth;
pub mod client;
pub mod poller;
pub mod retry;
pub mod upload;

pub use api::chat::VectorizeResponse;
pub use api::{MessageResponse, UploadResponse};
pub use auth::AuthContext;
pub use client::ApiClient;
pub use poller::{GenerationPoller, PollOutcome, StatusSource, STATUS_FETCH_FAILED};
pub use retry::{execute_with_retry, RetryConfig, RetryableError};
pub use upload::{collect_project_files, project_dir_name, UploadFile};
