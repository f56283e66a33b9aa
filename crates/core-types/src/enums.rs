use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed catalog of reports the dashboard can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Summary,
    Returns,
    Volatility,
    Volume,
    Average,
    Explore,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Summary,
        ReportKind::Returns,
        ReportKind::Volatility,
        ReportKind::Volume,
        ReportKind::Average,
        ReportKind::Explore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::Returns => "returns",
            ReportKind::Volatility => "volatility",
            ReportKind::Volume => "volume",
            ReportKind::Average => "average",
            ReportKind::Explore => "explore",
        }
    }

    /// The route the report is served under, e.g. `/summary`.
    pub fn path(&self) -> &'static str {
        match self {
            ReportKind::Summary => "/summary",
            ReportKind::Returns => "/returns",
            ReportKind::Volatility => "/volatility",
            ReportKind::Volume => "/volume",
            ReportKind::Average => "/average",
            ReportKind::Explore => "/explore",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| CoreError::InvalidInput("report".to_string(), s.to_string()))
    }
}

/// What the Explore page shows for the selected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMode {
    /// The raw daily rows, newest first.
    #[default]
    Prices,
    /// Min/max/avg close and average volume over the window.
    Stats,
}

impl ExploreMode {
    /// Accepts exactly `"prices"` or `"stats"`. Anything else, including a
    /// missing value or a different case, falls back to `Prices`.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("stats") => ExploreMode::Stats,
            _ => ExploreMode::Prices,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreMode::Prices => "prices",
            ExploreMode::Stats => "stats",
        }
    }
}

impl fmt::Display for ExploreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_accepts_only_exact_literals() {
        assert_eq!(ExploreMode::resolve(Some("stats")), ExploreMode::Stats);
        assert_eq!(ExploreMode::resolve(Some("prices")), ExploreMode::Prices);
        assert_eq!(ExploreMode::resolve(Some("bogus")), ExploreMode::Prices);
        assert_eq!(ExploreMode::resolve(Some("STATS")), ExploreMode::Prices);
        assert_eq!(ExploreMode::resolve(Some("")), ExploreMode::Prices);
        assert_eq!(ExploreMode::resolve(None), ExploreMode::Prices);
    }

    #[test]
    fn report_kind_parses_case_insensitively() {
        assert_eq!("Volatility".parse::<ReportKind>(), Ok(ReportKind::Volatility));
        assert_eq!(" summary ".parse::<ReportKind>(), Ok(ReportKind::Summary));
        assert!("sharpe".parse::<ReportKind>().is_err());
    }

    #[test]
    fn every_report_has_its_own_route() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.path(), format!("/{}", kind));
        }
    }
}
