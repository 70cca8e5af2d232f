//! Wire-level vocabulary of the session gate.
//!
//! [`types`] holds the typed request, the closed [`Action`] enumeration and the
//! [`Outcome`] every request resolves to. [`response_mapper`] turns an outcome into the
//! status code and JSON body written back to the caller.

pub mod response_mapper;
pub mod types;

pub use response_mapper::*;
pub use types::*;
