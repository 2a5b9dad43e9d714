use std::collections::VecDeque;

use tracing::debug;

use crate::core::FeedEntry;
use crate::error::{FeedError, Result};

/// Bounded sliding window of delivered lines, oldest first
#[derive(Debug, Clone)]
pub struct FeedBuffer {
    entries: VecDeque<FeedEntry>,
    capacity: usize,
}

impl FeedBuffer {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FeedError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append an entry, evicting the oldest one if the window is full.
    ///
    /// Returns the evicted entry, if any.
    pub fn append(&mut self, entry: FeedEntry) -> Option<FeedEntry> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            debug!("Evicted feed line: {}", old.text);
        }
        self.entries.push_back(entry);
        evicted
    }

    /// Current contents in delivery order
    pub fn snapshot(&self) -> Vec<FeedEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(buffer: &FeedBuffer) -> Vec<String> {
        buffer.snapshot().into_iter().map(|e| e.text).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(FeedBuffer::new(0).unwrap_err(), FeedError::InvalidCapacity(0));
    }

    #[test]
    fn test_append_below_capacity() {
        let mut buffer = FeedBuffer::new(3).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.append(FeedEntry::new("a")).is_none());
        assert!(buffer.append(FeedEntry::new("b")).is_none());
        assert_eq!(texts(&buffer), vec!["a", "b"]);
        assert!(!buffer.is_full());
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut buffer = FeedBuffer::new(3).unwrap();
        for text in ["a", "b", "c"] {
            buffer.append(FeedEntry::new(text));
        }
        assert!(buffer.is_full());

        let evicted = buffer.append(FeedEntry::new("d")).unwrap();
        assert_eq!(evicted.text, "a");
        assert_eq!(texts(&buffer), vec!["b", "c", "d"]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_window_holds_last_n() {
        let mut buffer = FeedBuffer::new(4).unwrap();
        for i in 0..20 {
            buffer.append(FeedEntry::new(i.to_string()));
            assert!(buffer.len() <= 4);
        }
        assert_eq!(texts(&buffer), vec!["16", "17", "18", "19"]);
    }

    #[test]
    fn test_capacity_one() {
        let mut buffer = FeedBuffer::new(1).unwrap();
        buffer.append(FeedEntry::new("x"));
        buffer.append(FeedEntry::new("y"));
        assert_eq!(texts(&buffer), vec!["y"]);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut buffer = FeedBuffer::new(2).unwrap();
        buffer.append(FeedEntry::new("a"));
        let first = buffer.snapshot();
        let second = buffer.snapshot();
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 1);
    }
}
