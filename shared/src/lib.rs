pub mod catalog;
pub mod models;
pub mod tally;
pub mod validation;

pub use catalog::{Catalog, CatalogError};
pub use models::*;
pub use validation::{validate_vote_request, ValidationError, MIN_TOKEN_LENGTH};
