//! Typed segments of an agent response.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three markers the upstream agent is contracted to emit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Thought,
    Observation,
    Answer,
}

impl BlockKind {
    pub const ALL: [BlockKind; 3] = [BlockKind::Thought, BlockKind::Observation, BlockKind::Answer];

    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "Thought" => Some(BlockKind::Thought),
            "Observation" => Some(BlockKind::Observation),
            "Answer" => Some(BlockKind::Answer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Thought => "Thought",
            BlockKind::Observation => "Observation",
            BlockKind::Answer => "Answer",
        }
    }

    /// Reasoning traces, as opposed to the final answer.
    pub fn is_reasoning(&self) -> bool {
        !matches!(self, BlockKind::Answer)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled, contiguous segment of an agent response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseBlock {
    pub kind: BlockKind,
    pub content: String,
}

impl ResponseBlock {
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

impl fmt::Display for ResponseBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.content)
    }
}
