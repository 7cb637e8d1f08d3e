//! Domain models with validation at construction
//!
//! Request payloads are turned into these types before the store is
//! touched. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod todo;
pub mod contact;

pub use validation::ValidationError;
pub use todo::{Todo, TodoId, TodoTitle, truthy};
pub use contact::{Contact, NewContact};
