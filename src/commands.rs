//! Operations the UI shell invokes. Every chat operation is gated on a valid
//! session; signed-out callers get the identity-provider URL to redirect to.

use tracing::{debug, info, instrument, warn};

use crate::chats::{Chat, ChatForm, ChatId, ChatTemplate};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::postprocessing::{BlockRenderer, HtmlRenderer, MessageView, ParseCache, ViewOptions};
use crate::state::{AppState, ChatMessage, Session, Theme};

pub struct App {
    config: AppConfig,
    state: AppState,
    cache: ParseCache,
    view_options: ViewOptions,
}

impl App {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let cache = ParseCache::new(config.parser.parser(), config.parser.cache_capacity()?);
        let view_options = config.parser.view_options();
        Ok(Self {
            config,
            state: AppState::new(),
            cache,
            view_options,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    /* ---------- 1.  SESSION ---------- */

    pub async fn sign_in(&self, session: Session) {
        self.state.session().sign_in(session).await;
    }

    /// Forget the session and everything loaded on behalf of that user.
    pub async fn sign_out(&self) {
        self.state.session().sign_out().await;
        self.state.conversation().close().await;
        self.state.chats().replace_all(Vec::new()).await;
        self.state.favourites().clear().await;
    }

    /// The current session, or `Unauthenticated` with a login URL that brings
    /// the user back to `return_to`.
    #[instrument(skip(self))]
    pub async fn require_session(&self, return_to: &str) -> AppResult<Session> {
        if let Some(session) = self.state.session().valid().await {
            return Ok(session);
        }
        let login_url = self.config.auth.login_redirect(return_to)?.to_string();
        debug!(%login_url, "No valid session, redirecting to login");
        Err(AppError::Unauthenticated { login_url })
    }

    /* ---------- 2.  CHATS ---------- */

    pub async fn list_chats(&self) -> AppResult<Vec<Chat>> {
        self.require_session("/").await?;
        Ok(self.state.chats().all().await)
    }

    /// Swap in a listing fetched from the backend. Chats on a model that is
    /// not configured are skipped; stars on chats that are gone are dropped.
    #[instrument(skip(self, chats))]
    pub async fn load_chats(&self, chats: Vec<Chat>) -> AppResult<usize> {
        self.require_session("/").await?;
        let models = &self.config.chats.models;
        let chats: Vec<Chat> = chats
            .into_iter()
            .filter(|chat| {
                let known = chat.model.is_available(models);
                if !known {
                    warn!(chat = %chat.id, model = %chat.model, "Skipping chat with unknown model");
                }
                known
            })
            .collect();
        let count = chats.len();
        self.state.chats().replace_all(chats).await;
        self.state.favourites().retain_known(self.state.chats()).await;
        info!(count, "Chats loaded");
        Ok(count)
    }

    /// Favourite chats in the order they were starred.
    pub async fn favourite_chats(&self) -> AppResult<Vec<Chat>> {
        self.require_session("/").await?;
        let mut chats = Vec::new();
        for id in self.state.favourites().ids().await {
            if let Some(chat) = self.state.chats().get(id).await {
                chats.push(chat);
            }
        }
        Ok(chats)
    }

    pub fn new_chat_form(&self) -> ChatForm {
        ChatForm::blank(&self.config.chats)
    }

    pub fn template_form(&self, name: &str) -> AppResult<ChatForm> {
        ChatTemplate::find(name)
            .map(|t| t.to_form(&self.config.chats))
            .ok_or_else(|| AppError::UnknownTemplate(name.to_string()))
    }

    pub async fn edit_chat_form(&self, id: ChatId) -> AppResult<ChatForm> {
        self.require_session(&chat_path(id)).await?;
        let chat = self.state.chats().get(id).await.ok_or(AppError::ChatNotFound(id))?;
        Ok(ChatForm::from_chat(&chat))
    }

    #[instrument(skip(self, form))]
    pub async fn create_chat(&self, form: &ChatForm) -> AppResult<Chat> {
        self.require_session("/chats/new").await?;
        let draft = form.validate(&self.config.chats).into_result().map_err(|errors| {
            warn!(errors = errors.len(), "Chat form rejected");
            AppError::Validation(errors)
        })?;

        let chat = Chat::create(draft);
        self.state.chats().insert(chat.clone()).await;
        info!(chat = %chat.id, title = %chat.title, "Chat created");
        Ok(chat)
    }

    #[instrument(skip(self, form))]
    pub async fn update_chat(&self, id: ChatId, form: &ChatForm) -> AppResult<Chat> {
        self.require_session(&chat_path(id)).await?;
        let draft = form.validate(&self.config.chats).into_result().map_err(|errors| {
            warn!(errors = errors.len(), "Chat form rejected");
            AppError::Validation(errors)
        })?;

        let chat = self
            .state
            .chats()
            .update(id, draft)
            .await
            .ok_or(AppError::ChatNotFound(id))?;
        info!(chat = %chat.id, "Chat updated");
        Ok(chat)
    }

    #[instrument(skip(self))]
    pub async fn delete_chat(&self, id: ChatId) -> AppResult<Chat> {
        self.require_session(&chat_path(id)).await?;
        let chat = self.state.chats().remove(id).await.ok_or(AppError::ChatNotFound(id))?;
        self.state.favourites().remove(id).await;
        if self.state.conversation().active_chat().await == Some(id) {
            self.state.conversation().close().await;
        }
        info!(chat = %id, "Chat deleted");
        Ok(chat)
    }

    pub async fn toggle_favourite(&self, id: ChatId) -> AppResult<bool> {
        self.require_session(&chat_path(id)).await?;
        if !self.state.chats().contains(id).await {
            return Err(AppError::ChatNotFound(id));
        }
        Ok(self.state.favourites().toggle(id).await)
    }

    /* ---------- 3.  MESSAGES ---------- */

    pub async fn open_chat(&self, id: ChatId, messages: Vec<ChatMessage>) -> AppResult<()> {
        self.require_session(&chat_path(id)).await?;
        if !self.state.chats().contains(id).await {
            return Err(AppError::ChatNotFound(id));
        }
        self.state.conversation().open(id, messages).await;
        Ok(())
    }

    /// Append a message to the open conversation and return its view.
    pub async fn receive_message(&self, message: ChatMessage) -> MessageView {
        let view = self.render_message(&message.content);
        if !self.state.conversation().push(message).await {
            warn!("Message received with no conversation open");
        }
        view
    }

    pub fn render_message(&self, raw: &str) -> MessageView {
        let blocks = self.cache.get_or_parse(raw);
        MessageView::build(raw, &blocks, &self.view_options)
    }

    pub fn render_html(&self, raw: &str) -> String {
        HtmlRenderer.render(&self.render_message(raw))
    }

    /* ---------- 4.  THEME ---------- */

    pub async fn theme(&self) -> Theme {
        self.state.theme().get().await
    }

    pub async fn set_theme(&self, theme: Theme) {
        self.state.theme().set(theme).await;
    }

    pub async fn toggle_theme(&self) -> Theme {
        self.state.theme().toggle().await
    }
}

fn chat_path(id: ChatId) -> String {
    format!("/chats/{}", id)
}
