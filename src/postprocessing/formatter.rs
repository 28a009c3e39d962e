//! Turns parsed blocks into something the message view can draw.

use crate::postprocessing::blocks::{BlockKind, ResponseBlock};
use crate::postprocessing::interpreter::normalize_breaks;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Start Thought / Observation blocks collapsed. Answers are always shown.
    pub collapse_reasoning: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            collapse_reasoning: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub kind: BlockKind,
    pub label: String,
    pub content: String,
    pub collapsed: bool,
}

impl RenderedBlock {
    fn from_block(block: &ResponseBlock, options: &ViewOptions) -> Self {
        Self {
            kind: block.kind,
            label: block.kind.label().to_string(),
            content: block.content.clone(),
            collapsed: options.collapse_reasoning && block.kind.is_reasoning(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum MessageView {
    Structured(Vec<RenderedBlock>),
    /// No marker found: show the raw text unsegmented.
    Plain(String),
}

impl MessageView {
    pub fn build(raw: &str, blocks: &[ResponseBlock], options: &ViewOptions) -> Self {
        if blocks.is_empty() {
            return MessageView::Plain(normalize_breaks(raw).trim().to_string());
        }
        MessageView::Structured(
            blocks
                .iter()
                .map(|block| RenderedBlock::from_block(block, options))
                .collect(),
        )
    }

    /// Text of the last Answer block, if the agent produced one.
    pub fn answer(&self) -> Option<&str> {
        match self {
            MessageView::Structured(blocks) => blocks
                .iter()
                .rev()
                .find(|b| b.kind == BlockKind::Answer)
                .map(|b| b.content.as_str()),
            MessageView::Plain(_) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, MessageView::Structured(_))
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
