use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Light and Dark swap; System resolves to Dark.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        }
    }
}

#[derive(Default)]
pub struct ThemeState {
    theme: RwLock<Theme>,
}

impl ThemeState {
    pub async fn get(&self) -> Theme {
        *self.theme.read().await
    }

    pub async fn set(&self, theme: Theme) {
        *self.theme.write().await = theme;
    }

    pub async fn toggle(&self) -> Theme {
        let mut theme = self.theme.write().await;
        *theme = theme.toggled();
        *theme
    }
}
