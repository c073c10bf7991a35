pub mod chat;
pub mod config;
pub mod docs;
pub mod evaluate;
pub mod feedback;
pub mod generate;
pub mod models;
pub mod projects;
pub mod session;
pub mod tree;
pub mod upload;

pub use chat::ChatCommand;
pub use config::ConfigCommand;
pub use docs::DocsCommand;
pub use evaluate::EvaluateArgs;
pub use feedback::FeedbackCommand;
pub use generate::GenerateArgs;
pub use session::SessionCommand;
pub use tree::TreeArgs;
pub use upload::UploadArgs;
