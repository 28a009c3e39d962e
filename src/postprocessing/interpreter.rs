//! Splits raw agent output into Thought / Observation / Answer blocks.

use crate::postprocessing::blocks::{BlockKind, ResponseBlock};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

static BREAK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("break marker pattern is valid"));

static STRICT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Thought|Observation|Answer)\s*:").expect("strict marker pattern is valid")
});

static LENIENT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Thought|Observation|Answer)\s*:?").expect("lenient marker pattern is valid")
});

/// How a marker keyword has to be written to open a block.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerMode {
    /// Keyword must be followed by a colon (`Answer:`), so prose mentioning
    /// "the Answer" stays inside the current block.
    #[default]
    Strict,
    /// Colon is optional; any occurrence of a keyword opens a block.
    Lenient,
}

impl MarkerMode {
    fn pattern(&self) -> &'static Regex {
        match self {
            MarkerMode::Strict => &STRICT_MARKER,
            MarkerMode::Lenient => &LENIENT_MARKER,
        }
    }
}

/// Replace `<br>` (and `<br/>`, `<br />`) with a newline.
pub fn normalize_breaks(raw: &str) -> Cow<'_, str> {
    BREAK_MARKER.replace_all(raw, "\n")
}

/// Stateless, thread-safe block parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseParser {
    mode: MarkerMode,
}

impl ResponseParser {
    pub fn new(mode: MarkerMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MarkerMode {
        self.mode
    }

    /// Parse one raw response. Never fails: input without markers yields an
    /// empty vector and text before the first marker is dropped.
    pub fn parse(&self, raw: &str) -> Vec<ResponseBlock> {
        let text = normalize_breaks(raw);

        // (kind, marker start, content start)
        let markers: Vec<(BlockKind, usize, usize)> = self
            .mode
            .pattern()
            .captures_iter(&text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let kind = BlockKind::from_marker(caps.get(1)?.as_str())?;
                Some((kind, whole.start(), whole.end()))
            })
            .collect();

        markers
            .iter()
            .enumerate()
            .map(|(i, &(kind, _, content_start))| {
                let content_end = markers
                    .get(i + 1)
                    .map(|&(_, next_start, _)| next_start)
                    .unwrap_or(text.len());
                ResponseBlock::new(kind, text[content_start..content_end].trim())
            })
            .collect()
    }
}

/// Parse with the default (strict) marker mode.
pub fn parse(raw: &str) -> Vec<ResponseBlock> {
    ResponseParser::default().parse(raw)
}
