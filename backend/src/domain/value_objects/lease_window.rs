use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::duration_spec::{DurationSpec, DurationUnit};

/// The `[start, end)` instants during which an allotment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl LeaseWindow {
    /// Calendar addition: months and years roll over real month lengths and
    /// clamp to the last day (Jan 31 + 1 month = Feb 28/29).
    pub fn starting_at(start: DateTime<Utc>, duration: &DurationSpec) -> Result<Self, String> {
        let n = duration.magnitude;
        let end = match duration.unit {
            DurationUnit::Year => n
                .checked_mul(12)
                .and_then(|months| start.checked_add_months(Months::new(months))),
            DurationUnit::Month => start.checked_add_months(Months::new(n)),
            DurationUnit::Week => TimeDelta::try_weeks(i64::from(n))
                .and_then(|delta| start.checked_add_signed(delta)),
            DurationUnit::Day => start.checked_add_days(Days::new(u64::from(n))),
            DurationUnit::Hour => TimeDelta::try_hours(i64::from(n))
                .and_then(|delta| start.checked_add_signed(delta)),
        };
        let end = end.ok_or_else(|| "Duration is too long".to_string())?;
        Ok(Self { start, end })
    }

    pub fn has_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.end <= now
    }
}
