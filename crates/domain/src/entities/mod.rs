//! Domain Entities - records exchanged with the Code Insight API

pub mod chat;
pub mod documentation;
pub mod feedback;
pub mod file_node;
pub mod generation;
pub mod setting;
pub mod user;

pub use chat::{ChatMessage, ChatQuery, ChatReply, ChatRole, ChatThread, VectorizeStatus};
pub use documentation::{
    process_documentation, DocumentUpdate, DocumentationRef, Evaluation, Project, Section,
    SectionUpdate,
};
pub use feedback::{FeedbackStatus, FileFeedback, SectionFeedback, SectionFeedbackStatus};
pub use file_node::{clean_project_name, visible_rows, FileNode, NodeKind, TreeRow};
pub use generation::{
    derive_root_path, GenerateRequest, GenerateResponse, GenerationState, GenerationStatus,
    GenerationStep, ModelChoice, StepState,
};
pub use setting::{model_options, Setting, MODELS_CATEGORY};
pub use user::{User, UserId};
