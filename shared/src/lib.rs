//! Request and response bodies exchanged between the Cohort web client and
//! the backend. Every field is optional on the way in so the server can name
//! what is missing instead of failing deserialization.

pub mod protocol;

pub use protocol::*;
