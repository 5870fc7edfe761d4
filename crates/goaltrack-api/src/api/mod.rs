// Public API routes and DTOs

pub mod common;
pub mod goals;
pub mod validation;

pub use common::{ErrorResponse, ListResponse};
