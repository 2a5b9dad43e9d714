pub mod classify;
pub mod entry;
pub mod script;

pub use classify::{classify, Category};
pub use entry::{FeedEntry, ScriptEntry};
pub use script::Script;
