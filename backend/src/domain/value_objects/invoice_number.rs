use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "INV-";

/// `INV-` followed by six uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        Self(format!("{PREFIX}{hex}"))
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let well_formed = raw
            .strip_prefix(PREFIX)
            .map(|hex| hex.len() == 6 && hex.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F')))
            .unwrap_or(false);
        if !well_formed {
            return Err("Invalid invoice number".to_string());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
