//! In-memory user record store.
//!
//! Records live in a `Vec` in insertion order for the lifetime of the
//! process; nothing survives a restart. Every operation is a linear scan.

use chrono::NaiveDate;

use crate::domain::ports::{ReplaceOutcome, UserRepository};
use crate::domain::{EmailAddress, User, UserDetails};

/// Process-local [`UserRepository`] adapter.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use user_registry::domain::User;
/// use user_registry::domain::ports::UserRepository;
/// use user_registry::outbound::memory::InMemoryUserRepository;
///
/// let mut repo = InMemoryUserRepository::new();
/// let birth_date = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date");
/// let user = User::try_from_parts("test@test.com", "John", "Doe", birth_date)
///     .expect("valid user");
/// repo.insert(user.clone());
/// assert_eq!(repo.find_by_email(user.email()), Some(user));
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Vec<User>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&mut self, user: User) -> User {
        self.users.push(user.clone());
        user
    }

    fn replace_by_email(&mut self, email: &EmailAddress, details: UserDetails) -> ReplaceOutcome {
        match self.users.iter_mut().find(|user| user.email() == email) {
            Some(user) => {
                user.replace_details(details);
                ReplaceOutcome::Replaced(user.clone())
            }
            None => ReplaceOutcome::NotFound,
        }
    }

    fn delete_by_email(&mut self, email: &EmailAddress) {
        self.users.retain(|user| user.email() != email);
    }

    fn find_by_email(&self, email: &EmailAddress) -> Option<User> {
        self.users.iter().find(|user| user.email() == email).cloned()
    }

    fn find_by_birth_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| (start..=end).contains(&user.birth_date()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonName;
    use rstest::{fixture, rstest};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn user(email: &str, birth_date: NaiveDate) -> User {
        let user = User::try_from_parts(email, "John", "Doe", birth_date).expect("valid user");
        let (email, details) = user.into_parts();
        User::new(
            email,
            details
                .with_address("123 Street")
                .with_phone_number("1234567890"),
        )
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw).expect("valid email")
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    fn insert_grows_collection(mut repo: InMemoryUserRepository) {
        let stored = repo.insert(user("test@test.com", date(2000, 1, 1)));

        assert_eq!(repo.len(), 1);
        assert_eq!(stored.email().as_ref(), "test@test.com");
    }

    #[rstest]
    fn insert_does_not_check_uniqueness(mut repo: InMemoryUserRepository) {
        repo.insert(user("test@test.com", date(2000, 1, 1)));
        repo.insert(user("test@test.com", date(2001, 1, 1)));

        assert_eq!(repo.len(), 2);
        let first = repo.find_by_email(&email("test@test.com")).expect("stored");
        assert_eq!(first.birth_date(), date(2000, 1, 1));
    }

    #[rstest]
    fn replace_overwrites_mutable_fields(mut repo: InMemoryUserRepository) {
        repo.insert(user("test@test.com", date(2000, 1, 1)));
        let details = UserDetails::new(
            PersonName::first("Updated").expect("valid name"),
            PersonName::last("User").expect("valid name"),
            date(2000, 1, 1),
        )
        .with_address("456 Updated Street")
        .with_phone_number("0987654321");

        let outcome = repo.replace_by_email(&email("test@test.com"), details.clone());

        let expected = User::new(email("test@test.com"), details);
        assert_eq!(outcome, ReplaceOutcome::Replaced(expected.clone()));
        assert_eq!(repo.find_by_email(&email("test@test.com")), Some(expected));
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    fn replace_clears_optional_fields(mut repo: InMemoryUserRepository) {
        repo.insert(user("test@test.com", date(2000, 1, 1)));
        let details = UserDetails::new(
            PersonName::first("John").expect("valid name"),
            PersonName::last("Doe").expect("valid name"),
            date(2000, 1, 1),
        );

        repo.replace_by_email(&email("test@test.com"), details);

        let stored = repo.find_by_email(&email("test@test.com")).expect("stored");
        assert!(stored.details().address.is_none());
        assert!(stored.details().phone_number.is_none());
    }

    #[rstest]
    fn replace_of_missing_key_reports_not_found(mut repo: InMemoryUserRepository) {
        let details = user("nonexistent@test.com", date(2000, 1, 1))
            .details()
            .clone();

        let outcome = repo.replace_by_email(&email("nonexistent@test.com"), details);

        assert_eq!(outcome, ReplaceOutcome::NotFound);
        assert!(repo.is_empty());
    }

    #[rstest]
    fn delete_removes_record(mut repo: InMemoryUserRepository) {
        repo.insert(user("test@test.com", date(2000, 1, 1)));

        repo.delete_by_email(&email("test@test.com"));

        assert!(repo.is_empty());
        assert!(repo.find_by_email(&email("test@test.com")).is_none());
    }

    #[rstest]
    fn delete_of_missing_key_is_noop(mut repo: InMemoryUserRepository) {
        repo.insert(user("keep@test.com", date(2000, 1, 1)));

        repo.delete_by_email(&email("gone@test.com"));
        repo.delete_by_email(&email("gone@test.com"));

        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    fn lookup_is_case_sensitive(mut repo: InMemoryUserRepository) {
        repo.insert(user("test@test.com", date(2000, 1, 1)));

        assert!(repo.find_by_email(&email("Test@test.com")).is_none());
    }

    #[rstest]
    fn range_is_inclusive_and_ordered(mut repo: InMemoryUserRepository) {
        repo.insert(user("late@test.com", date(2001, 12, 31)));
        repo.insert(user("before@test.com", date(1999, 12, 31)));
        repo.insert(user("early@test.com", date(2000, 1, 1)));
        repo.insert(user("after@test.com", date(2002, 1, 1)));

        let found = repo.find_by_birth_date_range(date(2000, 1, 1), date(2001, 12, 31));

        let emails: Vec<&str> = found.iter().map(|user| user.email().as_ref()).collect();
        assert_eq!(emails, ["late@test.com", "early@test.com"]);
    }

    #[rstest]
    fn single_day_range_matches_exact_date(mut repo: InMemoryUserRepository) {
        repo.insert(user("a@test.com", date(2000, 1, 1)));
        repo.insert(user("b@test.com", date(2000, 1, 2)));

        let found = repo.find_by_birth_date_range(date(2000, 1, 2), date(2000, 1, 2));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email().as_ref(), "b@test.com");
    }

    #[rstest]
    fn inverted_range_is_empty(mut repo: InMemoryUserRepository) {
        repo.insert(user("a@test.com", date(2000, 1, 1)));

        assert!(
            repo.find_by_birth_date_range(date(2001, 1, 1), date(1999, 1, 1))
                .is_empty()
        );
    }
}
