//! Application state, split into isolated slices. One `AppState` is built
//! per application instance and passed to whoever needs it.

pub mod chat_list;
pub mod conversation;
pub mod favourites;
pub mod session;
pub mod theme;

pub use chat_list::ChatList;
pub use conversation::{ChatMessage, Conversation, Role};
pub use favourites::Favourites;
pub use session::{Session, SessionState};
pub use theme::{Theme, ThemeState};

#[derive(Default)]
pub struct AppState {
    session: SessionState,
    chats: ChatList,
    favourites: Favourites,
    theme: ThemeState,
    conversation: Conversation,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn chats(&self) -> &ChatList {
        &self.chats
    }

    pub fn favourites(&self) -> &Favourites {
        &self.favourites
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}
