use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::chats::form::ChatDraft;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ChatId(Uuid);

impl ChatId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ChatId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Model identifier as understood by the backend. Form input goes through
/// `select`; listings from the backend are checked with `is_available`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ModelChoice(String);

impl ModelChoice {
    pub fn select(name: &str, available: &[String]) -> Option<Self> {
        available
            .iter()
            .find(|m| m.as_str() == name)
            .map(|m| Self(m.clone()))
    }

    pub fn is_available(&self, available: &[String]) -> bool {
        available.iter().any(|m| *m == self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
#[serde(try_from = "f32", into = "f32")]
pub struct Temperature(f32);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[error("temperature {0} is outside 0.0..=2.0")]
pub struct TemperatureOutOfRange(pub f32);

impl Temperature {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 2.0;

    pub fn new(value: f32) -> Option<Self> {
        (value.is_finite() && (Self::MIN..=Self::MAX).contains(&value)).then_some(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Temperature {
    type Error = TemperatureOutOfRange;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(TemperatureOutOfRange(value))
    }
}

impl From<Temperature> for f32 {
    fn from(temperature: Temperature) -> Self {
        temperature.0
    }
}

/// A configurable AI persona the user can talk to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub context: String,
    pub model: ModelChoice,
    pub temperature: Temperature,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn create(draft: ChatDraft) -> Self {
        let now = Utc::now();
        Self {
            id: ChatId::new(),
            title: draft.title,
            description: draft.description,
            context: draft.context,
            model: draft.model,
            temperature: draft.temperature,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: ChatDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.context = draft.context;
        self.model = draft.model;
        self.temperature = draft.temperature;
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
