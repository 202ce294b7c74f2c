//! Extracted page records
//!
//! A [`PageRecord`] is the structured output for one crawled page. Records
//! are immutable once created and are handed to the consumer as-is; Siphon
//! itself never stores them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;
use uuid::Uuid;

/// One extracted page's structured output
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// Unique identifier for this record
    pub id: Uuid,

    /// The normalized URL the page was fetched from
    pub source_url: String,

    /// Best-effort page title; empty when the page has none
    pub title: String,

    /// Readable text of the main article body
    pub content: String,

    /// Normalized outbound links discovered on the page, in document order
    pub outbound_links: Vec<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// Number of whitespace-separated words in `content`
    pub word_count: usize,
}

impl PageRecord {
    /// Builds a record for a page, deriving `word_count` from the content
    pub fn new(source_url: &Url, title: String, content: String, outbound_links: Vec<Url>) -> Self {
        let word_count = content.split_whitespace().count();

        Self {
            id: Uuid::new_v4(),
            source_url: source_url.to_string(),
            title,
            content,
            outbound_links: outbound_links.into_iter().map(|u| u.to_string()).collect(),
            created_at: Utc::now(),
            word_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_content(content: &str) -> PageRecord {
        let url = Url::parse("https://example.com/article").unwrap();
        PageRecord::new(&url, "Title".to_string(), content.to_string(), vec![])
    }

    #[test]
    fn test_word_count_derived() {
        let record = record_with_content("one two  three\nfour");
        assert_eq!(record.word_count, 4);
    }

    #[test]
    fn test_empty_content_zero_words() {
        let record = record_with_content("");
        assert_eq!(record.word_count, 0);
    }

    #[test]
    fn test_unique_ids() {
        let a = record_with_content("x");
        let b = record_with_content("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_links_serialized_as_strings() {
        let url = Url::parse("https://example.com/").unwrap();
        let links = vec![Url::parse("https://example.com/a").unwrap()];
        let record = PageRecord::new(&url, String::new(), String::new(), links);

        assert_eq!(record.outbound_links, vec!["https://example.com/a"]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source_url"], "https://example.com/");
        assert!(json["id"].is_string());
    }
}
