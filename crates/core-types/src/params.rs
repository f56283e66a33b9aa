//! Turns raw, untrusted request parameters into values the query layer may use.
//!
//! Malformed input is never rejected here. It is normalized to a default so an
//! interactive page always renders something sensible.

use crate::enums::ExploreMode;
use serde::Serialize;
use std::fmt;

/// A trading-day window, always within `[DayWindow::MIN, DayWindow::MAX]`.
///
/// The field is private: the only ways to obtain a `DayWindow` clamp the value,
/// so whatever reaches the SQL text builder is a small positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DayWindow(u16);

impl DayWindow {
    pub const MIN: u16 = 5;
    pub const MAX: u16 = 365;
    pub const DEFAULT: u16 = 30;

    /// Clamps any integer into the allowed window.
    pub fn clamp(days: i64) -> Self {
        let clamped = days.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // In range by construction, so the narrowing cannot lose information.
        Self(clamped as u16)
    }

    /// Parses a raw query-string value.
    ///
    /// Missing or non-integer text falls back to [`DayWindow::DEFAULT`]. An integer
    /// too large to represent saturates towards the bound on its side.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim) else {
            return Self::default();
        };
        match text.parse::<i64>() {
            Ok(days) => Self::clamp(days),
            Err(_) if is_integer_literal(text) => {
                if text.starts_with('-') {
                    Self(Self::MIN)
                } else {
                    Self(Self::MAX)
                }
            }
            Err(_) => Self::default(),
        }
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `true` for an optionally signed run of ASCII digits, i.e. text that only
/// failed to parse because it overflowed.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Picks the ticker to explore.
///
/// A present, non-blank value is passed through untouched: it is only ever used
/// as a bound query parameter, and an unknown ticker simply yields no rows.
/// A blank or whitespace-only value counts as absent rather than being passed
/// through, so `?ticker=` behaves like the bare page. Otherwise the first known
/// ticker is used. `None` means there is nothing to explore at all.
pub fn resolve_ticker(raw: Option<&str>, known_tickers: &[String]) -> Option<String> {
    match raw {
        Some(ticker) if !ticker.trim().is_empty() => Some(ticker.to_string()),
        _ => known_tickers.first().cloned(),
    }
}

/// The validated parameters of one Explore request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExploreQuery {
    pub ticker: String,
    pub days: DayWindow,
    pub mode: ExploreMode,
}

impl ExploreQuery {
    pub fn new(ticker: impl Into<String>, days: DayWindow, mode: ExploreMode) -> Self {
        Self {
            ticker: ticker.into(),
            days,
            mode,
        }
    }

    /// Builds a query from raw request values. Returns `None` only when no
    /// ticker was given and none are known.
    pub fn resolve(
        ticker: Option<&str>,
        days: Option<&str>,
        mode: Option<&str>,
        known_tickers: &[String],
    ) -> Option<Self> {
        let ticker = resolve_ticker(ticker, known_tickers)?;
        Some(Self::new(ticker, DayWindow::parse(days), ExploreMode::resolve(mode)))
    }

    /// `false` when the ticker can never name a stored company. Text columns
    /// cannot hold a NUL byte and the store rejects one as a parameter, so such
    /// a query is answered with no rows instead of being run.
    pub fn can_match(&self) -> bool {
        !self.ticker.contains('\0')
    }
}
