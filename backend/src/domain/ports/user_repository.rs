//! Driven port for the user record store.
//!
//! The store is a plain keyed collection: it never checks business rules and
//! has no failure modes of its own. Absence is reported through `Option` and
//! [`ReplaceOutcome`] rather than errors.
//!
//! Mutating methods take `&mut self`; callers that share a store across
//! threads must serialise access themselves (see
//! [`crate::domain::UserRegistryService`]).

use chrono::NaiveDate;

use crate::domain::{EmailAddress, User, UserDetails};

/// Result of [`UserRepository::replace_by_email`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The record existed and now carries the new details.
    Replaced(User),
    /// No record matched the key; nothing changed.
    NotFound,
}

/// Keyed collection of user records.
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send {
    /// Store `user` without any uniqueness check and return it.
    fn insert(&mut self, user: User) -> User;

    /// Overwrite the mutable fields of the record keyed by `email`.
    fn replace_by_email(&mut self, email: &EmailAddress, details: UserDetails) -> ReplaceOutcome;

    /// Remove the record keyed by `email`. Missing keys are ignored.
    fn delete_by_email(&mut self, email: &EmailAddress);

    /// Fetch the record keyed by `email`.
    fn find_by_email(&self, email: &EmailAddress) -> Option<User>;

    /// Records born within `start..=end`, in insertion order.
    fn find_by_birth_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<User>;
}
