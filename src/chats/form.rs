//! Create/edit form for chats and its field-level validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chats::model::{Chat, ModelChoice, Temperature};
use crate::config::ChatSettings;

/// Raw form input as the UI collects it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub context: String,
    pub model: String,
    pub temperature: f32,
}

/// Form input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatDraft {
    pub title: String,
    pub description: Option<String>,
    pub context: String,
    pub model: ModelChoice,
    pub temperature: Temperature,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    Context,
    Model,
    Temperature,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Context => "context",
            Field::Model => "model",
            Field::Temperature => "temperature",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, thiserror::Error)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum FieldProblem {
    #[error("is required")]
    Required,
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
    #[error("unknown model `{name}`")]
    UnknownModel { name: String },
    #[error("must be between {min} and {max}")]
    OutOfRange { min: f32, max: f32 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} {problem}")]
pub struct FieldError {
    pub field: Field,
    #[serde(flatten)]
    pub problem: FieldProblem,
}

impl FieldError {
    fn new(field: Field, problem: FieldProblem) -> Self {
        Self { field, problem }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    /// Every failing field, in form order.
    Invalid(Vec<FieldError>),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Validation::Valid(_) => &[],
            Validation::Invalid(errors) => errors,
        }
    }

    pub fn into_result(self) -> Result<T, Vec<FieldError>> {
        match self {
            Validation::Valid(value) => Ok(value),
            Validation::Invalid(errors) => Err(errors),
        }
    }
}

impl ChatForm {
    /// Empty form prefilled with the configured defaults.
    pub fn blank(settings: &ChatSettings) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            context: String::new(),
            model: settings.default_model.clone(),
            temperature: settings.default_temperature,
        }
    }

    pub fn from_chat(chat: &Chat) -> Self {
        Self {
            title: chat.title.clone(),
            description: chat.description.clone().unwrap_or_default(),
            context: chat.context.clone(),
            model: chat.model.as_str().to_string(),
            temperature: chat.temperature.value(),
        }
    }

    pub fn validate(&self, settings: &ChatSettings) -> Validation<ChatDraft> {
        let mut errors = Vec::new();

        let title = required_text(Field::Title, &self.title, settings.max_title_len, &mut errors);

        let description = self.description.trim();
        if description.chars().count() > settings.max_description_len {
            errors.push(FieldError::new(
                Field::Description,
                FieldProblem::TooLong {
                    max: settings.max_description_len,
                },
            ));
        }

        let context = required_text(Field::Context, &self.context, settings.max_context_len, &mut errors);

        let model_name = self.model.trim();
        let model = if model_name.is_empty() {
            errors.push(FieldError::new(Field::Model, FieldProblem::Required));
            None
        } else {
            let model = ModelChoice::select(model_name, &settings.models);
            if model.is_none() {
                errors.push(FieldError::new(
                    Field::Model,
                    FieldProblem::UnknownModel {
                        name: model_name.to_string(),
                    },
                ));
            }
            model
        };

        let temperature = Temperature::new(self.temperature);
        if temperature.is_none() {
            errors.push(FieldError::new(
                Field::Temperature,
                FieldProblem::OutOfRange {
                    min: Temperature::MIN,
                    max: Temperature::MAX,
                },
            ));
        }

        match (title, context, model, temperature) {
            (Some(title), Some(context), Some(model), Some(temperature)) if errors.is_empty() => {
                Validation::Valid(ChatDraft {
                    title,
                    description: (!description.is_empty()).then(|| description.to_string()),
                    context,
                    model,
                    temperature,
                })
            }
            _ => Validation::Invalid(errors),
        }
    }
}

fn required_text(field: Field, value: &str, max: usize, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, FieldProblem::Required));
        return None;
    }
    if value.chars().count() > max {
        errors.push(FieldError::new(field, FieldProblem::TooLong { max }));
        return None;
    }
    Some(value.to_string())
}
