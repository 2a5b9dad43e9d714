use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::classify::{classify, Category};

/// One authored line of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Literal line content
    pub text: String,

    /// Offset from playback start at which the line becomes visible
    pub delay_ms: u64,
}

impl ScriptEntry {
    pub fn new(text: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            text: text.into(),
            delay_ms,
        }
    }
}

/// A line that has been delivered into the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Copied from the script entry
    pub text: String,

    /// Wall-clock time of delivery, for display only
    pub delivered_at: DateTime<Utc>,

    /// Display category derived from `text`
    pub category: Category,
}

impl FeedEntry {
    /// Create a feed entry stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, Utc::now())
    }

    /// Create a feed entry with an explicit delivery time
    pub fn at(text: impl Into<String>, delivered_at: DateTime<Utc>) -> Self {
        let text = text.into();
        let category = classify(&text);
        Self {
            text,
            delivered_at,
            category,
        }
    }

    /// Delivery time formatted as `HH:MM:SS`
    pub fn time_label(&self) -> String {
        self.delivered_at.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_feed_entry_is_classified_on_creation() {
        let entry = FeedEntry::new("[WARN] drawdown 1.2%");
        assert_eq!(entry.category, Category::Warning);
        assert_eq!(entry.text, "[WARN] drawdown 1.2%");
    }

    #[test]
    fn test_time_label() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let entry = FeedEntry::at("hello", at);
        assert_eq!(entry.time_label(), "09:05:07");
    }
}
