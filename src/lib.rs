//! Scripted live-terminal feed shown on the Tesser landing page.
//!
//! A [`Session`] plays a [`Script`] into a bounded feed: seed lines appear at
//! once, scheduled lines appear after their delay, and the oldest line is
//! dropped when the window is full.

pub mod core;
pub mod error;
pub mod input;
pub mod playback;
pub mod settings;
pub mod ui;

pub use crate::core::{classify, Category, FeedEntry, Script, ScriptEntry};
pub use crate::error::{FeedError, ScriptError};
pub use crate::playback::{
    FeedBuffer, PlaybackConfig, PlaybackState, Progress, ScheduleHandle, Scheduler, Session,
};
pub use crate::settings::Settings;
