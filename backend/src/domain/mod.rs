//! Domain primitives, ports and services.
//!
//! Purpose: hold the user registry's business rules independently of any
//! transport or storage technology. Inbound adapters call the
//! [`ports::UserRegistry`] port; outbound adapters implement
//! [`ports::UserRepository`].
//!
//! Public surface:
//! - `User`, `UserDetails`, `EmailAddress`, `PersonName` — the record model.
//! - `UserRegistryService` — business rules over a record store.
//! - `Error` / `ErrorCode` — transport-agnostic error payload.
//! - `TraceId` — request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_registry_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, PersonName, User, UserDetails, UserValidationError};
pub use self::user_registry_service::{DEFAULT_MINIMUM_AGE, UserRegistryService};
