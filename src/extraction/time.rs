//! Time-range extraction from natural-language text.

use regex::Regex;

/// Finder for time-range phrases like "5pm to 6pm" or "5:00 PM - 6:00 PM".
///
/// The matched substring is returned verbatim; it is display text, not a
/// structured range, so nothing is normalized to 24-hour form and the end
/// time is not validated against the start.
pub struct TimeRangeFinder {
    pattern: Regex,
}

impl Default for TimeRangeFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeRangeFinder {
    /// Create a new time-range finder.
    pub fn new() -> Self {
        let pattern = Regex::new(
            r"(?i)(\d{1,2})(?::(\d{2}))?\s*(?:am|pm)\s+(?:to|-|until)\s+(\d{1,2})(?::(\d{2}))?\s*(?:am|pm)",
        )
        .expect("Invalid regex");
        Self { pattern }
    }

    /// Find a time range in text; `None` when no range is present.
    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern
            .find(text)
            .map(|m| m.as_str().to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_range() {
        let finder = TimeRangeFinder::new();
        assert_eq!(
            finder.find("study session from 5pm to 6pm").as_deref(),
            Some("5pm to 6pm")
        );
    }

    #[test]
    fn test_range_with_minutes_and_case() {
        let finder = TimeRangeFinder::new();
        assert_eq!(
            finder.find("meet from 5:00 PM - 6:30 PM today").as_deref(),
            Some("5:00 PM - 6:30 PM")
        );
    }

    #[test]
    fn test_until_separator() {
        let finder = TimeRangeFinder::new();
        assert_eq!(
            finder.find("block 9am until 11am").as_deref(),
            Some("9am until 11am")
        );
    }

    #[test]
    fn test_returned_verbatim_not_normalized() {
        let finder = TimeRangeFinder::new();
        // End before start is still returned as written.
        assert_eq!(
            finder.find("from 6pm to 5pm somehow").as_deref(),
            Some("6pm to 5pm")
        );
    }

    #[test]
    fn test_no_range() {
        let finder = TimeRangeFinder::new();
        assert!(finder.find("no times here").is_none());
        // A single time is not a range.
        assert!(finder.find("at 5pm").is_none());
    }
}
