//! Title derivation from natural-language text.
//!
//! Title extraction never fails: when no explicit marker is present the
//! input itself is stripped of request verbs, dates, and time ranges, and
//! whatever residue remains becomes the title, capped at 50 characters.

use regex::Regex;

/// Maximum length of an extracted title, in characters.
const MAX_TITLE_LEN: usize = 50;

/// Fallback title when nothing usable survives extraction.
const FALLBACK_TITLE: &str = "Event";

/// Extractor for event titles.
///
/// Tries, in order: an explicit `titled <phrase>` marker (tolerating the
/// "tilted" speech-to-text misrecognition), an `event/activity/task <name>`
/// clause, and finally stripping everything recognizably non-title from the
/// whole input.
pub struct TitleExtractor {
    titled_quoted: Regex,
    titled_bare: Regex,
    named_entity: Regex,
    trailing_from: Regex,
    request_prefix: Regex,
    day_first_date: Regex,
    month_first_date: Regex,
    numeric_slash_date: Regex,
    numeric_dash_date: Regex,
    weekday: Regex,
    time_range: Regex,
    question_tail: Regex,
    leading_article: Regex,
    dangling_connective: Regex,
    whitespace: Regex,
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleExtractor {
    /// Create a new title extractor.
    pub fn new() -> Self {
        let month = "January|February|March|April|May|June|July|August|September|October|November|December";
        Self {
            // "ti(tl|lt)ed" also accepts the common "tilted" misrecognition.
            titled_quoted: Regex::new(r#"(?i)\bti(?:tl|lt)ed\s+["']([^"']+)["']"#)
                .expect("Invalid regex"),
            titled_bare: Regex::new(
                r"(?i)\bti(?:tl|lt)ed\s+([^,.\n?!]+?)(?:\s+from|\s+at|\s+on|,|\.|\n|$)",
            )
            .expect("Invalid regex"),
            named_entity: Regex::new(
                r#"(?i)\b(?:event|activity|task)\s+(?:called\s+|named\s+|titled\s+)?["']?([^",.\n?!]+)["']?(?:[,.\n?!]|$)"#,
            )
            .expect("Invalid regex"),
            trailing_from: Regex::new(r"(?i)\s+from\s+.*").expect("Invalid regex"),
            request_prefix: Regex::new(
                r"(?i)(?:can you\s+|could you\s+|please\s+)*(?:schedule|add|create|plan|set up)\s+(?:an?\s+event\s+)?(?:for\s+)?",
            )
            .expect("Invalid regex"),
            day_first_date: Regex::new(&format!(
                r"(?i)(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{month})\s+\d{{4}}"
            ))
            .expect("Invalid regex"),
            month_first_date: Regex::new(&format!(
                r"(?i)(?:on\s+)?(?:{month})\s+\d{{1,2}}(?:st|nd|rd|th)?,?(?:\s+\d{{4}})?"
            ))
            .expect("Invalid regex"),
            numeric_slash_date: Regex::new(r"(?:on\s+)?\d{1,2}/\d{1,2}/\d{2,4}")
                .expect("Invalid regex"),
            numeric_dash_date: Regex::new(r"(?:on\s+)?\d{1,2}-\d{1,2}-\d{2,4}")
                .expect("Invalid regex"),
            weekday: Regex::new(
                r"(?i)(?:next\s+)?(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)",
            )
            .expect("Invalid regex"),
            time_range: Regex::new(
                r"(?i)from\s+\d{1,2}(?::\d{2})?\s*(?:am|pm)?\s+to\s+\d{1,2}(?::\d{2})?\s*(?:am|pm)?",
            )
            .expect("Invalid regex"),
            question_tail: Regex::new(r"(?s)\?.*$").expect("Invalid regex"),
            leading_article: Regex::new(r"(?i)^(?:a|an|the)\s+").expect("Invalid regex"),
            dangling_connective: Regex::new(r"(?i)(?:\s+(?:on|at|for|from))+$")
                .expect("Invalid regex"),
            whitespace: Regex::new(r"\s+").expect("Invalid regex"),
        }
    }

    /// Extract a title from text. Always returns a usable title.
    pub fn extract(&self, text: &str) -> String {
        // 1. Explicit "titled <phrase>" marker, quoted phrase preferred.
        let marker = self
            .titled_quoted
            .captures(text)
            .or_else(|| self.titled_bare.captures(text));
        if let Some(cap) = marker {
            let title = cap[1].trim();
            // Drop any time clause that leaked into the phrase.
            let title = self.trailing_from.replace(title, "");
            let title = title.trim();
            if !title.is_empty() {
                return truncate(title);
            }
        }

        // 2. "event/activity/task <name>" clause.
        if let Some(cap) = self.named_entity.captures(text) {
            let title = cap[1].trim();
            if !title.is_empty() {
                return truncate(title);
            }
        }

        // 3. Strip everything recognizably non-title from the whole input.
        let mut title = self.request_prefix.replace(text, "").into_owned();
        title = self.day_first_date.replace_all(&title, "").into_owned();
        title = self.numeric_slash_date.replace_all(&title, "").into_owned();
        title = self.numeric_dash_date.replace_all(&title, "").into_owned();
        title = self.month_first_date.replace_all(&title, "").into_owned();
        title = self.weekday.replace_all(&title, "").into_owned();
        title = self.time_range.replace_all(&title, "").into_owned();
        title = self.question_tail.replace(&title, "").into_owned();
        title = self.whitespace.replace_all(&title, " ").into_owned();
        title = title.trim().to_string();
        title = self.dangling_connective.replace(&title, "").into_owned();
        title = self.leading_article.replace(&title, "").into_owned();
        let title = title.trim();

        if title.is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            truncate(title)
        }
    }
}

/// Truncate to the title length cap, on a character boundary.
fn truncate(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_LEN {
        title.to_string()
    } else {
        title.chars().take(MAX_TITLE_LEN).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
