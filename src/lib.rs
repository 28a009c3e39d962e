//! Front-end core of a persona chat application.
//!
//! Agent replies interleave reasoning and a final answer using the markers
//! `Thought:`, `Observation:` and `Answer:`. [`postprocessing`] splits them
//! into typed blocks for the message view, [`chats`] holds the persona
//! records and their form validation, and [`state`] the application state
//! slices. [`commands::App`] ties them together for a UI shell.

pub mod chats;
pub mod commands;
pub mod config;
pub mod error;
pub mod postprocessing;
pub mod state;

pub use commands::App;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use postprocessing::{parse, BlockKind, ResponseBlock};
