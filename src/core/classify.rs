use serde::{Deserialize, Serialize};

const WARNING_MARKERS: &[&str] = &["WARN"];
const EXECUTION_MARKERS: &[&str] = &["EXEC"];
const SUCCESS_MARKERS: &[&str] = &["FILLED", "SUCCESS"];

/// Display category of a feed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Warning,
    Execution,
    Success,
    Info,
}

impl Category {
    /// Short fixed-width tag used by plain renderers
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Warning => "WRN",
            Category::Execution => "EXE",
            Category::Success => "OK ",
            Category::Info => "   ",
        }
    }
}

/// Classify a line by its markers.
///
/// Markers are checked in priority order (warning, execution, success) and
/// the first category with a marker present in `text` wins.
pub fn classify(text: &str) -> Category {
    let has_any = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

    if has_any(WARNING_MARKERS) {
        Category::Warning
    } else if has_any(EXECUTION_MARKERS) {
        Category::Execution
    } else if has_any(SUCCESS_MARKERS) {
        Category::Success
    } else {
        Category::Info
    }
}
