//! Session-gated action endpoint.
//!
//! A single `POST /endpoint` resource accepting `LOGIN`, `ACTION` and `LOGOUT` requests.
//! Each request runs through a fixed pipeline (credential check, body shape check,
//! session state machine) and resolves to one [`protocol::Outcome`], which is rendered as
//! a status code plus a small JSON body.

pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod protocol;
pub mod session_management;
pub mod validation;
pub mod web_interface;

pub use configuration::Config;
pub use controller::{Controller, Dispatcher};
pub use protocol::{Action, Outcome, Request};
