//! User record model.
//!
//! A record is identified by its [`EmailAddress`]; everything else lives in
//! [`UserDetails`], the part of a record that updates may overwrite.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Format errors raised while constructing user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The email was blank.
    EmptyEmail,
    /// The email did not look like `local@domain`.
    InvalidEmail,
    /// The first name was blank.
    EmptyFirstName,
    /// The last name was blank.
    EmptyLastName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::EmptyFirstName => write!(f, "first name is required"),
            Self::EmptyLastName => write!(f, "last name is required"),
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address identifying a user record.
///
/// Comparison is exact: `Alice@x.com` and `alice@x.com` are different keys.
///
/// # Examples
/// ```
/// use user_registry::domain::EmailAddress;
///
/// let email = EmailAddress::new("alice@x.com").expect("valid email");
/// assert_eq!(email.as_ref(), "alice@x.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    /// Wrap a lookup key without format checks.
    ///
    /// Keys only select existing records by exact comparison, so any string
    /// is acceptable; a malformed key simply matches nothing.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::EmailAddress;
    ///
    /// let key = EmailAddress::lookup_key("bob");
    /// assert_eq!(key.as_ref(), "bob");
    /// ```
    pub fn lookup_key(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Non-blank personal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    fn parse(value: String, blank: UserValidationError) -> Result<Self, UserValidationError> {
        if value.trim().is_empty() {
            return Err(blank);
        }
        Ok(Self(value))
    }

    /// Validate a first name.
    pub fn first(value: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::parse(value.into(), UserValidationError::EmptyFirstName)
    }

    /// Validate a last name.
    pub fn last(value: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::parse(value.into(), UserValidationError::EmptyLastName)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// Mutable fields of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    /// Given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Calendar date of birth, without a time zone.
    pub birth_date: NaiveDate,
    /// Free-form postal address.
    pub address: Option<String>,
    /// Free-form phone number.
    pub phone_number: Option<String>,
}

impl UserDetails {
    /// Build details with no address or phone number.
    pub fn new(first_name: PersonName, last_name: PersonName, birth_date: NaiveDate) -> Self {
        Self {
            first_name,
            last_name,
            birth_date,
            address: None,
            phone_number: None,
        }
    }

    /// Attach a postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// A stored user record.
///
/// ## Invariants
/// - `email` never changes once the record exists; updates only touch
///   [`UserDetails`].
///
/// Serialises as a flat camelCase object with `email`, `firstName`,
/// `lastName`, `birthDate` (`YYYY-MM-DD`), `address` and `phoneNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    email: EmailAddress,
    details: UserDetails,
}

impl User {
    /// Build a record from validated components.
    pub fn new(email: EmailAddress, details: UserDetails) -> Self {
        Self { email, details }
    }

    /// Fallible constructor from raw strings for the required fields.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use user_registry::domain::User;
    ///
    /// let birth_date = NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date");
    /// let user = User::try_from_parts("alice@x.com", "Alice", "Liddell", birth_date)
    ///     .expect("valid user");
    /// assert_eq!(user.email().as_ref(), "alice@x.com");
    /// ```
    pub fn try_from_parts(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Result<Self, UserValidationError> {
        let email = EmailAddress::new(email)?;
        let details = UserDetails::new(
            PersonName::first(first_name)?,
            PersonName::last(last_name)?,
            birth_date,
        );
        Ok(Self::new(email, details))
    }

    /// Identity key of the record.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Mutable part of the record.
    pub fn details(&self) -> &UserDetails {
        &self.details
    }

    /// Birth date used for age checks and range scans.
    pub fn birth_date(&self) -> NaiveDate {
        self.details.birth_date
    }

    /// Overwrite every mutable field, keeping the email.
    pub fn replace_details(&mut self, details: UserDetails) {
        self.details = details;
    }

    /// Split the record into its key and details.
    pub fn into_parts(self) -> (EmailAddress, UserDetails) {
        (self.email, self.details)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    email: String,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    address: Option<String>,
    phone_number: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let (email, details) = value.into_parts();
        Self {
            email: email.into(),
            first_name: details.first_name.into(),
            last_name: details.last_name.into(),
            birth_date: details.birth_date,
            address: details.address,
            phone_number: details.phone_number,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            email,
            first_name,
            last_name,
            birth_date,
            address,
            phone_number,
        } = value;
        let mut user = User::try_from_parts(email, first_name, last_name, birth_date)?;
        user.details.address = address;
        user.details.phone_number = phone_number;
        Ok(user)
    }
}
