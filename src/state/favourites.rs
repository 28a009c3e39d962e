use tokio::sync::RwLock;

use crate::chats::ChatId;
use crate::state::chat_list::ChatList;

/// Starred chats, in the order they were starred.
#[derive(Default)]
pub struct Favourites {
    ids: RwLock<Vec<ChatId>>,
}

impl Favourites {
    /// Flip the star on `id`; returns whether it is now a favourite.
    pub async fn toggle(&self, id: ChatId) -> bool {
        let mut ids = self.ids.write().await;
        match ids.iter().position(|&fav| fav == id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(id);
                true
            }
        }
    }

    pub async fn remove(&self, id: ChatId) {
        self.ids.write().await.retain(|&fav| fav != id);
    }

    pub async fn contains(&self, id: ChatId) -> bool {
        self.ids.read().await.contains(&id)
    }

    pub async fn ids(&self) -> Vec<ChatId> {
        self.ids.read().await.clone()
    }

    pub async fn clear(&self) {
        self.ids.write().await.clear();
    }

    /// Drop stars whose chat no longer exists. Holds the write lock
    /// throughout so concurrent toggles are not lost.
    pub async fn retain_known(&self, chats: &ChatList) {
        let mut ids = self.ids.write().await;
        let known = chats.ids().await;
        ids.retain(|id| known.contains(id));
    }
}
