//! HTTP inbound adapter exposing the user registry as a JSON REST API.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
