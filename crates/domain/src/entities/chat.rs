//! Chat threads over a vectorized project

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
        }
    }
}

/// One conversation thread, as listed by `GET /chat/history/{project}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub created_at: String,
}

/// `POST /chat/message` body. A `None` chat id opens a new thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatQuery {
    pub project_name: String,
    pub query: String,
    pub chat_id: Option<String>,
}

/// `GET /chat/vectorize-status/{project}` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizeStatus {
    pub is_vectorized: bool,
}

/// `POST /chat/message` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub chat_id: String,
    pub message: String,
}
