use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Accepts `local@domain.tld` with no whitespace anywhere and stores it
    /// lowercased, so ownership checks compare normalized addresses.
    pub fn new(email: impl Into<String>) -> Result<Self, String> {
        let email = email.into().trim().to_string();
        if email.len() > 255 {
            return Err("Email too long".to_string());
        }
        if !Self::is_well_formed(&email) {
            return Err("Invalid email format".to_string());
        }
        Ok(Self(email.to_lowercase()))
    }

    fn is_well_formed(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        match domain.rsplit_once('.') {
            Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_lowercased() {
        let email = Email::new("Amit@Startup.CO").unwrap();
        assert_eq!(email.as_str(), "amit@startup.co");
    }

    #[test]
    fn test_email_shape_rejections() {
        for bad in ["plain", "a@b", "@b.com", "a b@c.com", "a@@b.com", "a@.com", "a@b."] {
            assert!(Email::new(bad).is_err(), "{bad} should be rejected");
        }
    }
}
