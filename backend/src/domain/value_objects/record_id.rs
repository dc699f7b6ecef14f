use serde::{Deserialize, Serialize};
use std::fmt;

// Identifier newtypes for stored records. Parsing failures carry the record
// label so the HTTP layer can report "Invalid booking id" and friends.
macro_rules! record_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            pub fn parse(raw: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| format!("Invalid {} id", $label))
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(WorkspaceId, "workspace");
record_id!(BookingId, "booking");
record_id!(InvoiceId, "invoice");
record_id!(RequestId, "request");
