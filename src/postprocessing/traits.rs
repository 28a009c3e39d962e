//! Pluggable message renderers.

use crate::postprocessing::blocks::BlockKind;
use crate::postprocessing::formatter::{escape_html, MessageView, RenderedBlock};

pub trait BlockRenderer: Send + Sync {
    fn render(&self, view: &MessageView) -> String;
}

/// Reasoning goes into `<details>`, answers into a plain `<div>`.
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn body(content: &str) -> String {
        escape_html(content).replace('\n', "<br>")
    }

    fn block(block: &RenderedBlock) -> String {
        let class = block.label.to_lowercase();
        match block.kind {
            BlockKind::Answer => {
                format!(r#"<div class="{}">{}</div>"#, class, Self::body(&block.content))
            }
            BlockKind::Thought | BlockKind::Observation => format!(
                r#"<details class="{}"{}><summary>{}</summary>{}</details>"#,
                class,
                if block.collapsed { "" } else { " open" },
                block.label,
                Self::body(&block.content)
            ),
        }
    }
}

impl BlockRenderer for HtmlRenderer {
    fn render(&self, view: &MessageView) -> String {
        match view {
            MessageView::Structured(blocks) => {
                blocks.iter().map(Self::block).collect::<Vec<_>>().join("\n")
            }
            MessageView::Plain(text) => format!(r#"<div class="plain">{}</div>"#, Self::body(text)),
        }
    }
}

pub struct PlainRenderer;

impl BlockRenderer for PlainRenderer {
    fn render(&self, view: &MessageView) -> String {
        match view {
            MessageView::Structured(blocks) => blocks
                .iter()
                .map(|b| format!("{}: {}", b.label, b.content))
                .collect::<Vec<_>>()
                .join("\n\n"),
            MessageView::Plain(text) => text.clone(),
        }
    }
}
