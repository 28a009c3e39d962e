use thiserror::Error;

use crate::chats::{ChatId, FieldError};
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not signed in; continue at {login_url}")]
    Unauthenticated { login_url: String },
    #[error("Form has {} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Chat {0} not found")]
    ChatNotFound(ChatId),
    #[error("Unknown chat template `{0}`")]
    UnknownTemplate(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type AppResult<T> = Result<T, AppError>;
