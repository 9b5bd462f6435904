use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::BirthDateError;
use crate::account::errors::CredentialsError;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::PasswordError;

/// Account aggregate entity.
///
/// Represents a registered account. The password is only ever held as a
/// one-way hash; the `verified` flag stays false until the email-verification
/// flow completes.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub date_of_birth: BirthDate,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    ///
    /// # Returns
    /// AccountId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed AccountId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Person name value type
///
/// Trims surrounding whitespace; accepts letters and internal spaces only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Create a new valid person name.
    ///
    /// # Arguments
    /// * `name` - Raw name string, trimmed before validation
    ///
    /// # Returns
    /// Validated PersonName value object
    ///
    /// # Errors
    /// * `Empty` - Name is empty after trimming
    /// * `InvalidCharacters` - Contains characters other than letters and spaces
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err(NameError::InvalidCharacters);
        }
        Ok(Self(name))
    }

    /// Get name as string slice.
    ///
    /// # Returns
    /// Name string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trims surrounding whitespace and validates the address format. The
/// address is stored exactly as supplied; case is not normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string, trimmed before validation
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `Empty` - Address is empty after trimming
    /// * `InvalidFormat` - Address does not parse as an email address
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Date of birth value type
///
/// Parses `YYYY-MM-DD` into a valid calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse a date of birth from its wire representation.
    ///
    /// # Arguments
    /// * `date` - Raw date string, trimmed before parsing
    ///
    /// # Returns
    /// Validated BirthDate value object
    ///
    /// # Errors
    /// * `Empty` - Date is empty after trimming
    /// * `InvalidDate` - String is not a valid `YYYY-MM-DD` calendar date
    pub fn new(date: &str) -> Result<Self, BirthDateError> {
        let date = date.trim();
        if date.is_empty() {
            return Err(BirthDateError::Empty);
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(BirthDate)
            .map_err(|e| BirthDateError::InvalidDate(e.to_string()))
    }

    /// Get the underlying calendar date.
    ///
    /// # Returns
    /// NaiveDate value
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.format("%Y-%m-%d").fmt(f)
    }
}

/// Plain-text password accepted at signup.
///
/// Held only long enough to be hashed; enforces the minimum-length policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Create a new policy-checked password.
    ///
    /// # Arguments
    /// * `password` - Raw password string, trimmed before validation
    ///
    /// # Returns
    /// Validated Password value object
    ///
    /// # Errors
    /// * `Empty` - Password is empty after trimming
    /// * `TooShort` - Password shorter than 8 characters
    pub fn new(password: String) -> Result<Self, PasswordError> {
        let password = password.trim().to_string();
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    /// Get password as string slice.
    ///
    /// # Returns
    /// Password string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
    pub date_of_birth: BirthDate,
}

impl SignupCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `name` - Validated person name
    /// * `email` - Validated email address
    /// * `password` - Policy-checked plain text password (hashed by the service)
    /// * `date_of_birth` - Validated date of birth
    ///
    /// # Returns
    /// SignupCommand with validated fields
    pub fn new(
        name: PersonName,
        email: EmailAddress,
        password: Password,
        date_of_birth: BirthDate,
    ) -> Self {
        Self {
            name,
            email,
            password,
            date_of_birth,
        }
    }
}

/// Command to sign in to an existing account.
///
/// Signin only requires non-empty fields; the email is not re-validated
/// against the address format so lookups behave the same for malformed and
/// unknown addresses.
#[derive(Debug)]
pub struct SigninCommand {
    pub email: String,
    pub password: String,
}

impl SigninCommand {
    /// Construct a new signin command from raw credentials.
    ///
    /// # Arguments
    /// * `email` - Raw email string, trimmed
    /// * `password` - Raw password string, trimmed
    ///
    /// # Returns
    /// SigninCommand with trimmed fields
    ///
    /// # Errors
    /// * `Empty` - Either credential is empty after trimming
    pub fn new(email: String, password: String) -> Result<Self, CredentialsError> {
        let email = email.trim().to_string();
        let password = password.trim().to_string();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialsError::Empty);
        }
        Ok(Self { email, password })
    }
}

/// Outcome of a successful signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStatus {
    /// Account created; a verification mail was dispatched and signin stays
    /// blocked until the link is visited.
    Pending,
    /// Account created in open mode; no verification step is required.
    Completed,
}
