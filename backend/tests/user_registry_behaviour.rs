//! Behavioural tests for the user registry service backed by the in-memory
//! record store.
//!
//! These exercise the real adapter through the driving port, covering the
//! end-to-end registration scenarios and concurrent access to one store.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{Local, NaiveDate, TimeZone, Utc};
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};
use user_registry::domain::ports::{UserRegistry, UserRegistryError};
use user_registry::domain::{
    DEFAULT_MINIMUM_AGE, EmailAddress, PersonName, User, UserDetails, UserRegistryService,
};
use user_registry::outbound::memory::InMemoryUserRepository;

type Registry = UserRegistryService<InMemoryUserRepository>;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

fn user(raw_email: &str, birth_date: NaiveDate) -> User {
    User::try_from_parts(raw_email, "John", "Doe", birth_date).expect("valid user")
}

/// Clock pinned to midday on 15 June 2024, local time.
#[fixture]
fn clock() -> Arc<dyn Clock> {
    let now = Local
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("unambiguous local timestamp");
    let mut clock = MockClock::new();
    clock.expect_local().return_const(now);
    clock.expect_utc().return_const(now.with_timezone(&Utc));
    Arc::new(clock)
}

#[fixture]
fn registry(clock: Arc<dyn Clock>) -> Registry {
    UserRegistryService::new(InMemoryUserRepository::new(), clock, DEFAULT_MINIMUM_AGE)
}

fn born_between(registry: &Registry, start: NaiveDate, end: NaiveDate) -> Vec<String> {
    registry
        .users_born_between(start, end)
        .expect("valid range")
        .iter()
        .map(|user| user.email().to_string())
        .collect()
}

#[rstest]
fn registered_user_is_found_by_exact_birth_date(registry: Registry) {
    let alice = user("alice@x.com", date(1990, 1, 1));

    let created = registry.register(alice.clone()).expect("registration succeeds");

    assert_eq!(created, alice);
    assert_eq!(
        registry.users_born_between(date(1990, 1, 1), date(1990, 1, 1)),
        Ok(vec![alice])
    );
}

#[rstest]
fn second_registration_of_same_email_is_rejected(registry: Registry) {
    registry
        .register(user("alice@x.com", date(1990, 1, 1)))
        .expect("first registration succeeds");

    let error = registry
        .register(user("alice@x.com", date(1985, 7, 7)))
        .expect_err("duplicate rejected");

    assert_eq!(error, UserRegistryError::validation("user already exists"));
    assert_eq!(
        born_between(&registry, date(1900, 1, 1), date(2024, 1, 1)),
        ["alice@x.com"]
    );
}

#[rstest]
fn user_turning_minimum_age_this_year_is_accepted(registry: Registry) {
    // 2024 - 2006 == 18, even though the birthday has not yet passed.
    assert!(registry.register(user("teen@x.com", date(2006, 12, 31))).is_ok());
    assert!(registry.register(user("kid@x.com", date(2007, 1, 1))).is_err());
}

#[rstest]
fn delete_of_unknown_user_is_not_found(registry: Registry) {
    let error = registry.delete(&email("bob@x.com")).expect_err("missing");

    assert_eq!(
        error,
        UserRegistryError::not_found("user not found for bob@x.com")
    );
}

#[rstest]
fn deleted_user_disappears_and_cannot_be_deleted_twice(registry: Registry) {
    registry
        .register(user("test@example.com", date(1990, 1, 1)))
        .expect("registered");

    registry.delete(&email("test@example.com")).expect("deleted");

    assert!(born_between(&registry, date(1990, 1, 1), date(1990, 1, 1)).is_empty());
    assert!(matches!(
        registry.delete(&email("test@example.com")),
        Err(UserRegistryError::NotFound { .. })
    ));
}

#[rstest]
fn update_merges_fields_but_keeps_email(registry: Registry) {
    registry
        .register(user("alice@x.com", date(1990, 1, 1)))
        .expect("registered");
    let details = UserDetails::new(
        PersonName::first("Alicia").expect("valid name"),
        PersonName::last("Jones").expect("valid name"),
        date(1992, 2, 2),
    )
    .with_phone_number("555-0199");

    let updated = registry
        .update(&email("alice@x.com"), User::new(email("other@x.com"), details))
        .expect("update succeeds");

    assert_eq!(updated.email().as_ref(), "alice@x.com");
    assert_eq!(updated.details().first_name.as_ref(), "Alicia");
    assert_eq!(updated.details().phone_number.as_deref(), Some("555-0199"));
    assert_eq!(
        born_between(&registry, date(1992, 2, 2), date(1992, 2, 2)),
        ["alice@x.com"]
    );
    assert!(born_between(&registry, date(1990, 1, 1), date(1990, 1, 1)).is_empty());
}

#[rstest]
fn update_of_unknown_key_behaves_like_register(registry: Registry) {
    let created = registry
        .update(
            &email("ghost@x.com"),
            user("test1@example.com", date(1990, 1, 1)),
        )
        .expect("falls back to registration");
    assert_eq!(created.email().as_ref(), "test1@example.com");

    let error = registry
        .update(&email("ghost@x.com"), user("kid@x.com", date(2015, 1, 1)))
        .expect_err("fallback applies the age rule");
    assert_eq!(
        error,
        UserRegistryError::validation("user must be at least 18 years old")
    );
}

#[rstest]
fn range_returns_matches_in_insertion_order(registry: Registry) {
    for (raw, birth_date) in [
        ("user2@example.com", date(2000, 6, 6)),
        ("early@example.com", date(1999, 12, 31)),
        ("user1@example.com", date(2000, 5, 5)),
        ("late@example.com", date(2001, 1, 2)),
    ] {
        registry
            .register(user(raw, birth_date))
            .expect("registered");
    }

    assert_eq!(
        born_between(&registry, date(2000, 1, 1), date(2001, 1, 1)),
        ["user2@example.com", "user1@example.com"]
    );
}

#[rstest]
fn inverted_range_is_rejected(registry: Registry) {
    assert_eq!(
        registry.users_born_between(date(2024, 1, 1), date(2023, 1, 1)),
        Err(UserRegistryError::validation(
            "start date must not be after end date"
        ))
    );
}

#[rstest]
fn concurrent_registrations_of_one_email_store_one_record(registry: Registry) {
    const THREADS: usize = 16;
    let registry = Arc::new(registry);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|index| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let birth_year = 1960 + i32::try_from(index).expect("small index");
                barrier.wait();
                registry.register(user("race@x.com", date(birth_year, 1, 1)))
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker thread completes"))
        .collect();

    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().err())
            .all(|error| *error == UserRegistryError::validation("user already exists"))
    );
    assert_eq!(
        born_between(&registry, date(1900, 1, 1), date(2024, 1, 1)),
        ["race@x.com"]
    );
}
