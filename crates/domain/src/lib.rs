//! Domain Layer - Code Insight client business logic
//!
//! Contains ONLY pure client-side logic with no dependencies on:
//! - Infrastructure (HTTP, file systems, token storage)
//! - Presentation (terminal, progress bars)
//!
//! Layout:
//! - Entities: records exchanged with the backend (FileNode, GenerationStatus, ...)
//! - Value Objects: validated scalars (Rating, DocLevel)
//! - State machines: file selection, documentation tree, chat panel
//! - Form rules: feedback validation

pub mod chat_panel;
pub mod config;
pub mod doc_tree;
pub mod entities;
pub mod errors;
pub mod feedback_form;
pub mod selection;
pub mod value_objects;

// Re-export core domain types
pub use chat_panel::ChatPanel;
pub use config::InsightConfig;
pub use doc_tree::DocumentationTree;
pub use entities::{
    FileNode, GenerateRequest, GenerationState, GenerationStatus, NodeKind, Section, User,
};
pub use errors::{DomainError, DomainResult};
pub use feedback_form::{FeedbackDraft, MAX_FEEDBACK_LENGTH};
pub use selection::{FileSelectionTree, SelectionListener};
pub use value_objects::{DocLevel, Rating};
