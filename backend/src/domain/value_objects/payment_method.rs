use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Pay Now")]
    PayNow,
    #[serde(rename = "Pay Later")]
    PayLater,
    #[serde(rename = "Invoice")]
    Invoice,
}

impl PaymentMethod {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "Pay Now" => Ok(PaymentMethod::PayNow),
            "Pay Later" => Ok(PaymentMethod::PayLater),
            "Invoice" => Ok(PaymentMethod::Invoice),
            _ => Err("Payment method must be one of Pay Now, Pay Later, Invoice".to_string()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayNow => "Pay Now",
            PaymentMethod::PayLater => "Pay Later",
            PaymentMethod::Invoice => "Invoice",
        }
    }

    /// Only "Pay Now" settles at submission time.
    pub fn is_immediate(&self) -> bool {
        matches!(self, PaymentMethod::PayNow)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
