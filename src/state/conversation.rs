//! Messages of the chat currently open in the message view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::chats::ChatId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Default)]
struct ConversationInner {
    chat: Option<ChatId>,
    messages: Vec<ChatMessage>,
}

#[derive(Default)]
pub struct Conversation {
    inner: RwLock<ConversationInner>,
}

impl Conversation {
    /// Show `chat` with its already-loaded history.
    pub async fn open(&self, chat: ChatId, messages: Vec<ChatMessage>) {
        let mut inner = self.inner.write().await;
        debug!(chat = %chat, messages = messages.len(), "Conversation opened");
        inner.chat = Some(chat);
        inner.messages = messages;
    }

    /// Append to the open conversation. Returns `false` when none is open.
    pub async fn push(&self, message: ChatMessage) -> bool {
        let mut inner = self.inner.write().await;
        if inner.chat.is_none() {
            return false;
        }
        inner.messages.push(message);
        true
    }

    pub async fn active_chat(&self) -> Option<ChatId> {
        self.inner.read().await.chat
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.inner.read().await.messages.clone()
    }

    pub async fn close(&self) {
        let mut inner = self.inner.write().await;
        inner.chat = None;
        inner.messages.clear();
    }
}
