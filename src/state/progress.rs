use serde::Serialize;

/// A snapshot of crawl progress, recomputed after each page
///
/// Progress is derived from the real record count and frontier size, never
/// simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Number of records produced so far
    pub current_count: usize,

    /// The page budget; `None` in unbounded mode
    pub total_target: Option<usize>,

    /// Number of URLs waiting in the frontier
    pub queue_size: usize,
}

impl Progress {
    /// Percentage of the budget consumed, capped at 100; `None` when the
    /// job is unbounded
    pub fn percentage(&self) -> Option<u8> {
        let total = self.total_target?;
        if total == 0 {
            return Some(100);
        }
        Some(((self.current_count * 100 / total).min(100)) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounded() {
        let progress = Progress {
            current_count: 5,
            total_target: Some(20),
            queue_size: 3,
        };
        assert_eq!(progress.percentage(), Some(25));
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let progress = Progress {
            current_count: 50,
            total_target: Some(20),
            queue_size: 0,
        };
        assert_eq!(progress.percentage(), Some(100));
    }

    #[test]
    fn test_percentage_unbounded() {
        let progress = Progress {
            current_count: 5,
            total_target: None,
            queue_size: 3,
        };
        assert_eq!(progress.percentage(), None);
    }

    #[test]
    fn test_serializes_fields() {
        let progress = Progress {
            current_count: 2,
            total_target: Some(10),
            queue_size: 7,
        };
        let json = serde_json::to_value(progress).unwrap();
        assert_eq!(json["current_count"], 2);
        assert_eq!(json["total_target"], 10);
        assert_eq!(json["queue_size"], 7);
    }
}
