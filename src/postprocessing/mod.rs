//! Agent response handling before it reaches the message view:
//! block parsing, caching, and per-kind presentation.

pub mod blocks;
pub mod cache;
pub mod formatter;
pub mod interpreter;
pub mod traits;

pub use blocks::{BlockKind, ResponseBlock};
pub use cache::{CacheStats, ParseCache};
pub use formatter::{MessageView, RenderedBlock, ViewOptions};
pub use interpreter::{normalize_breaks, parse, MarkerMode, ResponseParser};
pub use traits::{BlockRenderer, HtmlRenderer, PlainRenderer};
