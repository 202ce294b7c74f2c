//! Stream event types
//!
//! Streaming crawls deliver a typed event sequence: a `start` marker, then
//! `page` records interleaved with `progress` snapshots and per-page
//! `warning`s, closed by exactly one terminal event (`complete`, `error`,
//! or `cancelled`). Wire framing is the consumer's concern; the engine only
//! yields these values.

use crate::record::PageRecord;
use crate::state::Progress;
use serde::Serialize;

/// One event in a streaming crawl
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrawlEvent {
    /// The crawl loop has started
    Start { seed: String },

    /// A page was fetched and extracted
    Page { record: PageRecord },

    /// Progress snapshot, emitted after each page
    Progress { progress: Progress },

    /// A single page failed to fetch or extract; the crawl continues
    Warning { url: String, message: String },

    /// Terminal: the budget was reached or the frontier emptied
    Complete { total: usize },

    /// Terminal: the job itself failed (never caused by one page)
    Error { message: String },

    /// Terminal: the consumer cancelled the crawl
    Cancelled { total: usize },
}

impl CrawlEvent {
    /// Returns true for events that close the stream
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete { .. } | Self::Error { .. } | Self::Cancelled { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let event = CrawlEvent::Complete { total: 7 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["total"], 7);
    }

    #[test]
    fn test_warning_serialization() {
        let event = CrawlEvent::Warning {
            url: "https://example.com/x".to_string(),
            message: "HTTP 500".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["url"], "https://example.com/x");
    }

    #[test]
    fn test_progress_serialization() {
        let event = CrawlEvent::Progress {
            progress: Progress {
                current_count: 1,
                total_target: None,
                queue_size: 4,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "progress");
        assert_eq!(json["progress"]["queue_size"], 4);
    }

    #[test]
    fn test_terminal_classification() {
        assert!(CrawlEvent::Complete { total: 0 }.is_terminal());
        assert!(CrawlEvent::Cancelled { total: 0 }.is_terminal());
        assert!(CrawlEvent::Error {
            message: String::new()
        }
        .is_terminal());
        assert!(!CrawlEvent::Start {
            seed: String::new()
        }
        .is_terminal());
    }
}
