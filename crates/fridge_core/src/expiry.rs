//! crates/fridge_core/src/expiry.rs
//!
//! Finds month/year expiration tokens in OCR'd label text.
//!
//! A token is `MM/YY`, `MM-YY`, `MM/YYYY` or `MM-YYYY` with the month in `01..=12`.
//! Only the leftmost candidate in a line is considered. A candidate is accepted
//! when its (month, two-digit year) is the current month or later; the comparison
//! is done purely on two-digit years, so "01/99" is treated as older than "01/05".

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

use crate::ports::Clock;

// Plain substring search: neighbouring digits do not disqualify a match.
// The 4-digit year alternative is tried first so "07/2027" is not cut to "07/20".
static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(0[1-9]|1[0-2])[/-](\d{4}|\d{2})")
        .expect("date token pattern is valid")
});

/// A validated expiration token, normalized to month and two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateToken {
    month: u32,
    year: u32,
}

impl DateToken {
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Two-digit year, `0..=99`.
    pub fn year(&self) -> u32 {
        self.year
    }

    /// The `MM/YY` form.
    pub fn normalized(&self) -> String {
        self.to_string()
    }

    /// Last calendar day of the token's month, assuming the 2000s.
    pub fn last_day(&self) -> Option<NaiveDate> {
        let year = 2000 + self.year as i32;
        let first_of_next = if self.month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, self.month + 1, 1)?
        };
        Some(first_of_next - Duration::days(1))
    }

    fn is_current_or_future(&self, today: NaiveDate) -> bool {
        let current_year = today.year().rem_euclid(100) as u32;
        let current_month = today.month();
        self.year > current_year || (self.year == current_year && self.month >= current_month)
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

/// Returns the first month/year token in `text` if it is not already in the past.
pub fn extract_expiry_token(text: &str, today: NaiveDate) -> Option<DateToken> {
    let caps = DATE_TOKEN.captures(text)?;

    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    let year_digits = caps.get(2)?.as_str();
    let year: u32 = year_digits[year_digits.len() - 2..].parse().ok()?;

    let token = DateToken { month, year };
    if token.is_current_or_future(today) {
        Some(token)
    } else {
        debug!(token = %token, "Rejected expiry token in the past");
        None
    }
}

/// Scans OCR lines in order and returns the first accepted token.
pub fn extract_from_lines<'a, I>(lines: I, today: NaiveDate) -> Option<DateToken>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .find_map(|line| extract_expiry_token(line, today))
}

/// Same as [`extract_expiry_token`], with "today" read from a clock.
pub fn extract_with_clock(text: &str, clock: &dyn Clock) -> Option<DateToken> {
    extract_expiry_token(text, clock.today())
}
