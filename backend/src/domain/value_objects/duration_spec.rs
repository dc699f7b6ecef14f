use serde::{Deserialize, Serialize};
use std::fmt;

const WEEKS_PER_MONTH: f64 = 4.34;
const DAYS_PER_MONTH: f64 = 30.44;
const HOURS_PER_MONTH: f64 = DAYS_PER_MONTH * 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
}

impl DurationUnit {
    /// Case-insensitive prefix match: "Years", "month", "weekly" all resolve.
    fn from_word(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        [
            ("year", DurationUnit::Year),
            ("month", DurationUnit::Month),
            ("week", DurationUnit::Week),
            ("day", DurationUnit::Day),
            ("hour", DurationUnit::Hour),
        ]
        .into_iter()
        .find(|(prefix, _)| word.starts_with(prefix))
        .map(|(_, unit)| unit)
    }

    fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Year => "year",
            DurationUnit::Month => "month",
            DurationUnit::Week => "week",
            DurationUnit::Day => "day",
            DurationUnit::Hour => "hour",
        }
    }
}

/// A parsed `"<number> <unit>"` booking duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSpec {
    pub magnitude: u32,
    pub unit: DurationUnit,
}

impl DurationSpec {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut parts = raw.split_whitespace();
        let (Some(number), Some(word), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("Duration '{}' must look like '3 months'", raw.trim()));
        };
        let magnitude: u32 = number
            .parse()
            .map_err(|_| format!("Duration amount '{number}' must be a whole number"))?;
        if magnitude == 0 {
            return Err("Duration amount must be greater than zero".to_string());
        }
        let unit = DurationUnit::from_word(word)
            .ok_or_else(|| format!("Unknown duration unit '{word}'"))?;
        Ok(Self { magnitude, unit })
    }

    /// Duration normalized to months, the pricing unit.
    pub fn month_equivalent(&self) -> f64 {
        let n = f64::from(self.magnitude);
        match self.unit {
            DurationUnit::Year => n * 12.0,
            DurationUnit::Month => n,
            DurationUnit::Week => n / WEEKS_PER_MONTH,
            DurationUnit::Day => n / DAYS_PER_MONTH,
            DurationUnit::Hour => n / HOURS_PER_MONTH,
        }
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.magnitude == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.magnitude, self.unit.as_str(), plural)
    }
}
