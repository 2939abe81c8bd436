//! Inbound adapters translating external requests into domain port calls.
//!
//! - **http**: Actix Web handlers for the `/api/v1/users` resource and the
//!   health probes.

pub mod http;
