//! Domain models with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod association;
pub mod validation;

pub use association::{Association, NewAssociation, DEAL_ID_MAX_LEN, EMAIL_MAX_LEN};
pub use validation::ValidationError;
