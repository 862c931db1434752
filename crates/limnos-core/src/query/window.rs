use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

use crate::error::LimnosError;
use crate::query::Observation;

/// A relative time window, anchored at the latest timestamp of the
/// population being filtered rather than at wall-clock now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    #[default]
    All,
    Months(u32),
    Days(u32),
}

impl TimeWindow {
    pub const LAST_MONTH: TimeWindow = TimeWindow::Months(1);
    pub const LAST_HALF_YEAR: TimeWindow = TimeWindow::Months(6);

    /// Earliest timestamp kept when the latest observation is `latest`.
    /// `None` means no lower bound.
    pub fn cutoff(&self, latest: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Months(n) => latest.checked_sub_months(Months::new(*n)),
            TimeWindow::Days(n) => latest.checked_sub_days(Days::new(u64::from(*n))),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::All => write!(f, "all"),
            TimeWindow::Months(1) => write!(f, "last_month"),
            TimeWindow::Months(6) => write!(f, "last_half_year"),
            TimeWindow::Months(n) => write!(f, "last_{n}_months"),
            TimeWindow::Days(n) => write!(f, "last_{n}_days"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = LimnosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "all" => return Ok(TimeWindow::All),
            "last_month" => return Ok(TimeWindow::LAST_MONTH),
            "last_half_year" => return Ok(TimeWindow::LAST_HALF_YEAR),
            _ => {}
        }

        let invalid = || LimnosError::InvalidWindow(s.to_string());
        let rest = lower.strip_prefix("last_").ok_or_else(invalid)?;
        if let Some(n) = rest.strip_suffix("_months") {
            n.parse().map(TimeWindow::Months).map_err(|_| invalid())
        } else if let Some(n) = rest.strip_suffix("_days") {
            n.parse().map(TimeWindow::Days).map_err(|_| invalid())
        } else {
            Err(invalid())
        }
    }
}

/// Parse an ISO-8601 sample time.
///
/// Accepts RFC 3339 with an offset (normalised to UTC), local date-times
/// with optional fractional seconds or without seconds, and bare dates
/// (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Latest valid timestamp in the population.
pub fn latest_timestamp(observations: &[Observation]) -> Option<NaiveDateTime> {
    observations.iter().filter_map(|o| o.timestamp).max()
}

/// Keep observations with timestamp in `[cutoff, latest]`, where `latest`
/// is the newest timestamp in `observations`. Observations without a valid
/// timestamp never pass, not even for [`TimeWindow::All`]. Input order is
/// kept.
pub fn filter_window(observations: &[Observation], window: TimeWindow) -> Vec<Observation> {
    let Some(latest) = latest_timestamp(observations) else {
        return Vec::new();
    };
    let cutoff = window.cutoff(latest);

    observations
        .iter()
        .filter(|o| match (o.timestamp, cutoff) {
            (None, _) => false,
            (Some(t), Some(c)) => t >= c && t <= latest,
            (Some(t), None) => t <= latest,
        })
        .cloned()
        .collect()
}
