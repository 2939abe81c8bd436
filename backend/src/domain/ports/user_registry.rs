//! Driving port for user registration use-cases.
//!
//! Inbound adapters call this port; [`crate::domain::UserRegistryService`] is
//! the production implementation.

use chrono::NaiveDate;

use crate::domain::{EmailAddress, Error, User};

use super::define_port_error;

define_port_error! {
    /// Business-rule failures raised by the user registry.
    pub enum UserRegistryError {
        /// Input breaks a business rule (duplicate email, under age, inverted range).
        Validation { message: String } => "{message}",
        /// The targeted record does not exist.
        NotFound { message: String } => "{message}",
    }
}

impl From<UserRegistryError> for Error {
    fn from(value: UserRegistryError) -> Self {
        match value {
            UserRegistryError::Validation { message } => Error::invalid_request(message),
            UserRegistryError::NotFound { message } => Error::not_found(message),
        }
    }
}

/// User registration, update, removal and birth-date queries.
#[cfg_attr(test, mockall::automock)]
pub trait UserRegistry: Send + Sync {
    /// Create a record for `candidate`.
    fn register(&self, candidate: User) -> Result<User, UserRegistryError>;

    /// Replace the details of the record keyed by `email`, registering
    /// `changes` as a new record when the key is unknown.
    fn update(&self, email: &EmailAddress, changes: User) -> Result<User, UserRegistryError>;

    /// Remove the record keyed by `email`.
    fn delete(&self, email: &EmailAddress) -> Result<(), UserRegistryError>;

    /// Records born within `start..=end`, in insertion order.
    fn users_born_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, UserRegistryError>;
}
