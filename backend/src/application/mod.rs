// Application layer - use cases organized by persona
// Orchestrates domain logic, depends on domain layer only

pub mod error;
pub mod access;
pub mod validation;
pub mod invoicing;
pub mod notifications;
pub mod occupants;
pub mod ports;

pub mod public;
pub mod member;
pub mod admin;
pub mod front_desk;

pub use error::AppError;
