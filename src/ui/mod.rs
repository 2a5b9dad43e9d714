pub mod terminal;

pub use terminal::{category_color, FeedWindow, RenderMode};
