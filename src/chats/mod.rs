//! Chat personas: typed records, the create/edit form and its validation.

pub mod form;
pub mod model;
pub mod templates;

pub use form::{ChatDraft, ChatForm, Field, FieldError, FieldProblem, Validation};
pub use model::{Chat, ChatId, ModelChoice, Temperature, TemperatureOutOfRange};
pub use templates::ChatTemplate;

#[cfg(test)]
mod tests;
