//! Chats known to the front-end, as loaded from and edited against the backend.

use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::chats::{Chat, ChatDraft, ChatId};

#[derive(Default)]
pub struct ChatList {
    chats: RwLock<HashMap<ChatId, Chat>>,
}

impl ChatList {
    /// Swap in a fresh listing.
    pub async fn replace_all(&self, chats: Vec<Chat>) {
        let mut map = self.chats.write().await;
        *map = chats.into_iter().map(|c| (c.id, c)).collect();
        debug!(count = map.len(), "Chat list replaced");
    }

    pub async fn insert(&self, chat: Chat) {
        self.chats.write().await.insert(chat.id, chat);
    }

    /// Apply an edit; `None` if the chat is unknown.
    pub async fn update(&self, id: ChatId, draft: ChatDraft) -> Option<Chat> {
        let mut chats = self.chats.write().await;
        let chat = chats.get_mut(&id)?;
        chat.apply(draft);
        Some(chat.clone())
    }

    pub async fn remove(&self, id: ChatId) -> Option<Chat> {
        self.chats.write().await.remove(&id)
    }

    pub async fn get(&self, id: ChatId) -> Option<Chat> {
        self.chats.read().await.get(&id).cloned()
    }

    pub async fn contains(&self, id: ChatId) -> bool {
        self.chats.read().await.contains_key(&id)
    }

    pub async fn ids(&self) -> HashSet<ChatId> {
        self.chats.read().await.keys().copied().collect()
    }

    /// Most recently updated first; ties broken by title.
    pub async fn all(&self) -> Vec<Chat> {
        let mut chats: Vec<Chat> = self.chats.read().await.values().cloned().collect();
        chats.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        chats
    }

    pub async fn len(&self) -> usize {
        self.chats.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chats.read().await.is_empty()
    }
}
