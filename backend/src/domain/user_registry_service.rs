//! User registry domain service.
//!
//! Enforces the registration rules (unique email, minimum age, ordered date
//! ranges) on top of a [`UserRepository`]. The service owns its store behind
//! a mutex and holds the lock for the whole of each operation, so
//! lookup-then-insert, replace-then-register and lookup-then-delete are each
//! applied atomically with respect to other callers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Datelike, NaiveDate};
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{ReplaceOutcome, UserRegistry, UserRegistryError, UserRepository};
use crate::domain::{EmailAddress, User};

/// Default minimum age applied when configuration does not override it.
pub const DEFAULT_MINIMUM_AGE: u32 = 18;

/// Domain service implementing the [`UserRegistry`] port.
pub struct UserRegistryService<R> {
    repository: Mutex<R>,
    clock: Arc<dyn Clock>,
    minimum_age: u32,
}

impl<R> UserRegistryService<R> {
    /// Create a service owning `repository`.
    ///
    /// `minimum_age` is compared against the calendar-year difference between
    /// the clock's current local date and the candidate's birth date.
    pub fn new(repository: R, clock: Arc<dyn Clock>, minimum_age: u32) -> Self {
        Self {
            repository: Mutex::new(repository),
            clock,
            minimum_age,
        }
    }

    /// Configured minimum age in years.
    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    /// Lock the store for the duration of one operation.
    ///
    /// Store methods apply each mutation in a single step, so a poisoned lock
    /// never guards a half-written collection and can be recovered.
    fn store(&self) -> MutexGuard<'_, R> {
        self.repository
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Calendar years only: month and day are ignored, so a candidate born on
    // 31 December counts a full year older on 1 January.
    fn ensure_minimum_age(&self, candidate: &User) -> Result<(), UserRegistryError> {
        let current_year = i64::from(self.clock.local().year());
        let birth_year = i64::from(candidate.birth_date().year());
        if current_year - birth_year < i64::from(self.minimum_age) {
            warn!(
                email = %candidate.email(),
                minimum_age = self.minimum_age,
                "registration rejected: under minimum age"
            );
            return Err(UserRegistryError::validation(format!(
                "user must be at least {} years old",
                self.minimum_age
            )));
        }
        Ok(())
    }
}

impl<R: UserRepository> UserRegistryService<R> {
    fn register_locked(&self, store: &mut R, candidate: User) -> Result<User, UserRegistryError> {
        let existing = store.find_by_email(candidate.email());
        self.ensure_minimum_age(&candidate)?;

        if existing.is_some() {
            warn!(email = %candidate.email(), "registration rejected: user already exists");
            return Err(UserRegistryError::validation("user already exists"));
        }

        let created = store.insert(candidate);
        info!(email = %created.email(), "user registered");
        Ok(created)
    }
}

impl<R: UserRepository> UserRegistry for UserRegistryService<R> {
    fn register(&self, candidate: User) -> Result<User, UserRegistryError> {
        let mut store = self.store();
        self.register_locked(&mut store, candidate)
    }

    fn update(&self, email: &EmailAddress, changes: User) -> Result<User, UserRegistryError> {
        let mut store = self.store();
        match store.replace_by_email(email, changes.details().clone()) {
            ReplaceOutcome::Replaced(updated) => {
                info!(email = %email, "user updated");
                Ok(updated)
            }
            ReplaceOutcome::NotFound => {
                info!(
                    email = %email,
                    candidate = %changes.email(),
                    "update target missing; registering payload instead"
                );
                self.register_locked(&mut store, changes)
            }
        }
    }

    fn delete(&self, email: &EmailAddress) -> Result<(), UserRegistryError> {
        let mut store = self.store();
        if store.find_by_email(email).is_none() {
            warn!(email = %email, "delete rejected: user not found");
            return Err(UserRegistryError::not_found(format!(
                "user not found for {email}"
            )));
        }
        store.delete_by_email(email);
        info!(email = %email, "user deleted");
        Ok(())
    }

    fn users_born_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, UserRegistryError> {
        if start > end {
            warn!(%start, %end, "birth date range rejected: start after end");
            return Err(UserRegistryError::validation(
                "start date must not be after end date",
            ));
        }
        Ok(self.store().find_by_birth_date_range(start, end))
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
