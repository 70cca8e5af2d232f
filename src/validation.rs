//! Pure, side-effect-free request checks.
//!
//! Both validators only read their inputs and the provisioned credentials, so they run
//! outside the session lock.

pub mod credential_validator;
pub mod request_validator;
pub mod secrets;

pub use credential_validator::check_credentials;
pub use request_validator::{check_shape, WellFormed};
