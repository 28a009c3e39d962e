//! Re-usable chat presets for the "new chat" form.

use crate::chats::form::ChatForm;
use crate::config::ChatSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatTemplate {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub context: &'static str,
    pub temperature: f32,
}

static BUILTIN: [ChatTemplate; 3] = [
    ChatTemplate {
        name: "assistant",
        title: "Assistant",
        description: "General purpose helper.",
        context: "You are a helpful assistant. Answer clearly and concisely.",
        temperature: 0.7,
    },
    ChatTemplate {
        name: "reasoning-agent",
        title: "Reasoning agent",
        description: "Shows its reasoning before answering.",
        context: "Work step by step. Prefix each reasoning step with `Thought:`, \
                  each tool result with `Observation:` and the final reply with `Answer:`.",
        temperature: 0.2,
    },
    ChatTemplate {
        name: "tutor",
        title: "Tutor",
        description: "Explains concepts with examples and checks understanding.",
        context: "You are a patient tutor. Explain with small examples and end with a short question.",
        temperature: 0.5,
    },
];

impl ChatTemplate {
    pub fn builtin() -> &'static [ChatTemplate] {
        &BUILTIN
    }

    pub fn find(name: &str) -> Option<&'static ChatTemplate> {
        BUILTIN.iter().find(|t| t.name == name)
    }

    /// Prefill a form; the model is always the configured default.
    pub fn to_form(&self, settings: &ChatSettings) -> ChatForm {
        ChatForm {
            title: self.title.to_string(),
            description: self.description.to_string(),
            context: self.context.to_string(),
            model: settings.default_model.clone(),
            temperature: self.temperature,
        }
    }
}
