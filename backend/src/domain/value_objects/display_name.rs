use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_CHARS: usize = 120;

/// A person's name as typed on a form: surrounding blanks dropped and inner
/// runs of whitespace folded to one space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if raw.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Err("Name contains invalid characters".to_string());
        }
        let folded = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        match folded.chars().count() {
            0 => Err("Name cannot be empty".to_string()),
            n if n > MAX_CHARS => Err(format!("Name must be at most {MAX_CHARS} characters")),
            _ => Ok(Self(folded)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
