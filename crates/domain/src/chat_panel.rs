//! Chat panel state: thread list, current thread and the in-flight guard.

use crate::entities::chat::{ChatMessage, ChatQuery, ChatThread};
use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct ChatPanel {
    project_name: String,
    is_vectorized: bool,
    chats: Vec<ChatThread>,
    selected: Option<String>,
    sending: bool,
    vectorizing: bool,
}

impl ChatPanel {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            is_vectorized: false,
            chats: Vec::new(),
            selected: None,
            sending: false,
            vectorizing: false,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn is_vectorized(&self) -> bool {
        self.is_vectorized
    }

    pub fn set_vectorized(&mut self, vectorized: bool) {
        self.is_vectorized = vectorized;
    }

    pub fn chats(&self) -> &[ChatThread] {
        &self.chats
    }

    pub fn selected_chat(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the thread list with a fresh history fetch.
    ///
    /// When no thread is selected the first one becomes current.
    pub fn replace_history(&mut self, chats: Vec<ChatThread>) {
        self.chats = chats;
        if self.selected.is_none() {
            self.selected = self.chats.first().map(|c| c.id.clone());
        }
    }

    pub fn select_chat(&mut self, chat_id: &str) -> DomainResult<()> {
        if !self.chats.iter().any(|c| c.id == chat_id) {
            return Err(DomainError::InvalidValue {
                kind: "chat",
                value: chat_id.to_string(),
            });
        }
        self.selected = Some(chat_id.to_string());
        Ok(())
    }

    /// The next message opens a new thread
    pub fn start_new_chat(&mut self) {
        self.selected = None;
    }

    pub fn selected_messages(&self) -> &[ChatMessage] {
        self.selected
            .as_deref()
            .and_then(|id| self.chats.iter().find(|c| c.id == id))
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Validate and lock the input for one send.
    ///
    /// Must be paired with [`ChatPanel::finish_send`] whatever the outcome.
    pub fn begin_send(&mut self, message: &str) -> DomainResult<ChatQuery> {
        let query = message.trim();
        if query.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        if !self.is_vectorized {
            return Err(DomainError::NotVectorized(self.project_name.clone()));
        }
        if self.sending {
            return Err(DomainError::RequestInFlight);
        }
        self.sending = true;
        Ok(ChatQuery {
            project_name: self.project_name.clone(),
            query: query.to_string(),
            chat_id: self.selected.clone(),
        })
    }

    pub fn finish_send(&mut self) {
        self.sending = false;
    }

    pub fn begin_vectorize(&mut self) -> DomainResult<()> {
        if self.vectorizing {
            return Err(DomainError::RequestInFlight);
        }
        self.vectorizing = true;
        Ok(())
    }

    pub fn finish_vectorize(&mut self, success: bool) {
        self.vectorizing = false;
        if success {
            self.is_vectorized = true;
        }
    }

    /// Drop a deleted thread; clears the selection if it pointed there.
    pub fn chat_deleted(&mut self, chat_id: &str) {
        self.chats.retain(|c| c.id != chat_id);
        if self.selected.as_deref() == Some(chat_id) {
            self.selected = None;
        }
    }
}
