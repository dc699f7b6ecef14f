use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Optional leading `+`, then digits with spaces or hyphens between them.
    /// At least ten digits are required.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into().trim().to_string();
        let body = raw.strip_prefix('+').unwrap_or(&raw);
        let allowed = body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
        let digits = body.chars().filter(char::is_ascii_digit).count();
        if !allowed || digits < MIN_DIGITS {
            return Err("Invalid contact number".to_string());
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
