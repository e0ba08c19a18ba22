//! Date resolution from natural-language text.
//!
//! The resolver runs a fixed, ordered cascade of matcher strategies over the
//! input and short-circuits on the first one that produces a calendar date:
//!
//! - day-first absolute dates: "17th of January 2026", "17 January 2026"
//! - month-first absolute dates: "January 17th, 2026"
//! - numeric dates: "1/17/2026", "1-17-26"
//! - weekday names: "Monday", "next Friday"
//! - bare ordinal days: "17th" (current month)
//!
//! A miss in every matcher is a normal outcome, not an error. The resulting
//! ISO date string is always assembled from integer components with
//! zero-padded formatting; it never passes through a timezone-aware
//! conversion that could shift the day near midnight.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

/// The twelve canonical English month names, lowercase, January first.
const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Display forms of the month names, for human-readable date phrases.
const MONTH_DISPLAY: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Look up a month number (1-12) from a name, case-insensitive.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .map(|i| i as u32 + 1)
}

/// Alternation of the month names for embedding into patterns.
fn month_alternation() -> String {
    MONTH_NAMES.join("|")
}

// ============================================================================
// Resolved Date
// ============================================================================

/// A calendar date resolved from text.
///
/// Carries the integer components plus the human-readable phrase the date
/// was resolved from, which confirmation messages echo back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    display: String,
}

impl ResolvedDate {
    /// Build a resolved date, rejecting calendar-invalid combinations.
    fn from_ymd(year: i32, month: u32, day: u32, display: impl Into<String>) -> Option<Self> {
        // Validity check only; the date value itself is never formatted
        // through chrono.
        NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            year,
            month,
            day,
            display: display.into(),
        })
    }

    /// Build a resolved date from a month name and numeric components.
    ///
    /// The name must be one of the twelve canonical English month names,
    /// matched case-insensitively; anything else is not a date.
    pub fn from_month_name(
        name: &str,
        day: u32,
        year: i32,
        display: impl Into<String>,
    ) -> Option<Self> {
        let month = month_number(name)?;
        Self::from_ymd(year, month, day, display)
    }

    /// The `YYYY-MM-DD` form, zero-padded, assembled digit-by-digit.
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// The original human-readable date phrase.
    pub fn display(&self) -> &str {
        &self.display
    }
}

// ============================================================================
// Matcher Strategies
// ============================================================================

/// A single strategy for resolving a date from text.
///
/// Matchers are tried in a fixed order; the first success wins and no later
/// matcher runs, so earlier strategies take priority on ambiguous input.
trait DateMatcher: Send + Sync {
    fn try_match(&self, text: &str, reference: NaiveDate) -> Option<ResolvedDate>;
}

/// "17th of January 2026" / "17 January 2026".
struct DayFirstMatcher {
    pattern: Regex,
}

impl DayFirstMatcher {
    fn new() -> Self {
        let pattern = Regex::new(&format!(
            r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({})\s+(\d{{4}})\b",
            month_alternation()
        ))
        .expect("Invalid regex");
        Self { pattern }
    }
}

impl DateMatcher for DayFirstMatcher {
    fn try_match(&self, text: &str, _reference: NaiveDate) -> Option<ResolvedDate> {
        let cap = self.pattern.captures(text)?;
        let day = cap[1].parse::<u32>().ok()?;
        let month = month_number(&cap[2])?;
        let year = cap[3].parse::<i32>().ok()?;
        ResolvedDate::from_ymd(year, month, day, cap.get(0)?.as_str())
    }
}

/// "January 17th, 2026" / "January 17 2026".
struct MonthFirstMatcher {
    pattern: Regex,
}

impl MonthFirstMatcher {
    fn new() -> Self {
        let pattern = Regex::new(&format!(
            r"(?i)\b({})\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b",
            month_alternation()
        ))
        .expect("Invalid regex");
        Self { pattern }
    }
}

impl DateMatcher for MonthFirstMatcher {
    fn try_match(&self, text: &str, _reference: NaiveDate) -> Option<ResolvedDate> {
        let cap = self.pattern.captures(text)?;
        let month = month_number(&cap[1])?;
        let day = cap[2].parse::<u32>().ok()?;
        let year = cap[3].parse::<i32>().ok()?;
        ResolvedDate::from_ymd(year, month, day, cap.get(0)?.as_str())
    }
}

/// Numeric "MM/DD/YYYY" or "MM-DD-YYYY"; 2-digit years are 2000-based.
struct NumericMatcher {
    pattern: Regex,
}

impl NumericMatcher {
    fn new() -> Self {
        let pattern =
            Regex::new(r"\b(\d{1,2})([/-])(\d{1,2})([/-])(\d{2,4})\b").expect("Invalid regex");
        Self { pattern }
    }
}

impl DateMatcher for NumericMatcher {
    fn try_match(&self, text: &str, _reference: NaiveDate) -> Option<ResolvedDate> {
        let cap = self.pattern.captures(text)?;
        // Mixed separators ("1/17-2026") are not a date.
        if cap[2] != cap[4] {
            return None;
        }
        let month = cap[1].parse::<u32>().ok()?;
        let day = cap[3].parse::<u32>().ok()?;
        let mut year = cap[5].parse::<i32>().ok()?;
        if year < 100 {
            year += 2000;
        }
        ResolvedDate::from_ymd(year, month, day, cap.get(0)?.as_str())
    }
}

/// A weekday name, optionally prefixed with "next".
///
/// Resolves to the next occurrence strictly after the reference date: a
/// weekday matching today still advances a full week. "next Monday" and a
/// bare "Monday" resolve identically.
struct WeekdayMatcher {
    pattern: Regex,
}

impl WeekdayMatcher {
    fn new() -> Self {
        let pattern = Regex::new(
            r"(?i)\b(?:next\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        )
        .expect("Invalid regex");
        Self { pattern }
    }
}

impl DateMatcher for WeekdayMatcher {
    fn try_match(&self, text: &str, reference: NaiveDate) -> Option<ResolvedDate> {
        let cap = self.pattern.captures(text)?;
        let target = match cap[1].to_lowercase().as_str() {
            "monday" => 0i64,
            "tuesday" => 1,
            "wednesday" => 2,
            "thursday" => 3,
            "friday" => 4,
            "saturday" => 5,
            "sunday" => 6,
            _ => return None,
        };

        let current = reference.weekday().num_days_from_monday() as i64;
        let mut days_ahead = target - current;
        if days_ahead <= 0 {
            days_ahead += 7;
        }

        let date = reference + chrono::Duration::days(days_ahead);
        ResolvedDate::from_ymd(date.year(), date.month(), date.day(), cap.get(0)?.as_str())
    }
}

/// A bare ordinal day ("17th"), resolved in the reference month and year.
struct BareOrdinalMatcher {
    pattern: Regex,
}

impl BareOrdinalMatcher {
    fn new() -> Self {
        let pattern = Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("Invalid regex");
        Self { pattern }
    }
}

impl DateMatcher for BareOrdinalMatcher {
    fn try_match(&self, text: &str, reference: NaiveDate) -> Option<ResolvedDate> {
        let cap = self.pattern.captures(text)?;
        let day = cap[1].parse::<u32>().ok()?;
        ResolvedDate::from_ymd(
            reference.year(),
            reference.month(),
            day,
            cap.get(0)?.as_str(),
        )
    }
}

// ============================================================================
// Date Resolver
// ============================================================================

/// Resolver for textual date expressions.
pub struct DateResolver {
    /// Matchers in priority order; the first match wins.
    matchers: Vec<Box<dyn DateMatcher>>,
    /// Reference date for relative calculations (defaults to today).
    reference_date: NaiveDate,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateResolver {
    /// Create a new resolver with today as the reference date.
    pub fn new() -> Self {
        Self::with_reference_date(Local::now().date_naive())
    }

    /// Create a resolver with a specific reference date.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            matchers: vec![
                Box::new(DayFirstMatcher::new()),
                Box::new(MonthFirstMatcher::new()),
                Box::new(NumericMatcher::new()),
                Box::new(WeekdayMatcher::new()),
                Box::new(BareOrdinalMatcher::new()),
            ],
            reference_date,
        }
    }

    /// The reference date used for relative calculations.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// The reference date in ISO form, assembled from components.
    pub fn reference_iso(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.reference_date.year(),
            self.reference_date.month(),
            self.reference_date.day()
        )
    }

    /// Resolve a date from text; `None` when no pattern matches.
    pub fn resolve(&self, text: &str) -> Option<ResolvedDate> {
        self.matchers
            .iter()
            .find_map(|m| m.try_match(text, self.reference_date))
    }

    /// The reference date itself, as a resolved date with a readable phrase.
    ///
    /// Used for the literal "today" keyword, which the orchestrator checks
    /// outside the cascade.
    pub fn resolve_reference(&self) -> ResolvedDate {
        let month = self.reference_date.month();
        let display = format!(
            "{} {} {}",
            MONTH_DISPLAY[(month - 1) as usize],
            self.reference_date.day(),
            self.reference_date.year()
        );
        ResolvedDate {
            year: self.reference_date.year(),
            month,
            day: self.reference_date.day(),
            display,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn resolver_at(year: i32, month: u32, day: u32) -> DateResolver {
        DateResolver::with_reference_date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_day_first_form() {
        let resolver = resolver_at(2026, 1, 1);
        let date = resolver.resolve("17th of January 2026").unwrap();
        assert_eq!(date.iso(), "2026-01-17");
        assert_eq!(date.display(), "17th of January 2026");

        let date = resolver.resolve("17 January 2026").unwrap();
        assert_eq!(date.iso(), "2026-01-17");
    }

    #[test]
    fn test_month_first_form() {
        let resolver = resolver_at(2026, 1, 1);
        let date = resolver.resolve("January 17th, 2026").unwrap();
        assert_eq!(date.iso(), "2026-01-17");

        let date = resolver.resolve("January 17 2026").unwrap();
        assert_eq!(date.iso(), "2026-01-17");
    }

    #[test]
    fn test_numeric_forms() {
        let resolver = resolver_at(2026, 1, 1);
        assert_eq!(resolver.resolve("1/17/2026").unwrap().iso(), "2026-01-17");
        assert_eq!(resolver.resolve("1-17-2026").unwrap().iso(), "2026-01-17");
        // 2-digit year normalizes into the 2000s
        assert_eq!(resolver.resolve("1/17/26").unwrap().iso(), "2026-01-17");
    }

    #[test]
    fn test_month_name_case_insensitive() {
        let resolver = resolver_at(2026, 1, 1);
        assert_eq!(
            resolver.resolve("JANUARY 17 2026").unwrap().iso(),
            "2026-01-17"
        );
        assert_eq!(
            resolver.resolve("17 january 2026").unwrap().iso(),
            "2026-01-17"
        );
    }

    #[test]
    fn test_weekday_resolves_strictly_after_reference() {
        // 2026-01-05 is a Monday
        let reference = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(reference.weekday(), Weekday::Mon);

        let resolver = DateResolver::with_reference_date(reference);
        let date = resolver.resolve("Monday").unwrap();
        // Same weekday as the reference still advances a full week.
        assert_eq!(date.iso(), "2026-01-12");

        let date = resolver.resolve("Tuesday").unwrap();
        assert_eq!(date.iso(), "2026-01-06");

        let date = resolver.resolve("Sunday").unwrap();
        assert_eq!(date.iso(), "2026-01-11");
    }

    #[test]
    fn test_next_weekday_prefix() {
        let resolver = resolver_at(2026, 1, 5); // Monday
        let bare = resolver.resolve("Friday").unwrap();
        let next = resolver.resolve("next Friday").unwrap();
        assert_eq!(bare.iso(), next.iso());
        assert_eq!(next.display(), "next Friday");
    }

    #[test]
    fn test_every_weekday_is_within_a_week() {
        let resolver = resolver_at(2026, 1, 7); // Wednesday
        for name in [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ] {
            let date = resolver.resolve(name).unwrap();
            let resolved = NaiveDate::from_ymd_opt(date.year, date.month, date.day).unwrap();
            let delta = (resolved - resolver.reference_date()).num_days();
            assert!((1..=7).contains(&delta), "{name} resolved {delta} days out");
        }
    }

    #[test]
    fn test_bare_ordinal_in_reference_month() {
        let resolver = resolver_at(2026, 3, 2);
        let date = resolver.resolve("the 17th").unwrap();
        assert_eq!(date.iso(), "2026-03-17");
    }

    #[test]
    fn test_cascade_priority_absolute_before_weekday() {
        let resolver = resolver_at(2026, 1, 5);
        // Both a weekday and an absolute date are present; the absolute
        // date matchers run first.
        let date = resolver
            .resolve("Saturday, January 17th, 2026")
            .unwrap();
        assert_eq!(date.iso(), "2026-01-17");
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        let resolver = resolver_at(2026, 1, 1);
        assert!(resolver.resolve("February 31 2026").is_none());
        assert!(resolver.resolve("13/45/2026").is_none());
    }

    #[test]
    fn test_junk_text_yields_none() {
        let resolver = resolver_at(2026, 1, 1);
        assert!(resolver.resolve("junk text").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn test_resolve_reference() {
        let resolver = resolver_at(2026, 8, 6);
        let date = resolver.resolve_reference();
        assert_eq!(date.iso(), "2026-08-06");
        assert_eq!(date.display(), "August 6 2026");
    }

    #[test]
    fn test_iso_is_zero_padded() {
        let resolver = resolver_at(2026, 1, 1);
        let date = resolver.resolve("March 5 2026").unwrap();
        assert_eq!(date.iso(), "2026-03-05");
    }
}
