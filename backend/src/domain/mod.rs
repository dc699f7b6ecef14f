// Domain layer - business logic, entities, value objects
// No dependencies on other layers

pub mod entities;
pub mod value_objects;
pub mod pricing;

pub use entities::*;
pub use value_objects::*;
