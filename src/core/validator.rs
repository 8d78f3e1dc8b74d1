//! Row validation
//!
//! Maps a raw CSV row to a [`NewCustomer`] or the first [`ValidationError`]
//! encountered. Checks run in a fixed order (name, email, age) and stop at
//! the first failure. No side effects.

use crate::types::{NewCustomer, RawRow, ValidationError};
use regex::Regex;
use std::sync::LazyLock;

/// Minimum name length, counted in characters after trimming
pub const MIN_NAME_CHARS: usize = 2;

/// Inclusive age bounds
pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=120;

// local@domain.tld: no whitespace or '@' in either part, at least one '.' after the '@'
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Validate one raw row
///
/// 1. `name` is trimmed and must have at least 2 characters
/// 2. `email` is trimmed, lower-cased and must look like `local@domain.tld`
/// 3. `age` is trimmed and must parse as an integer in 1-120
pub fn validate(row: &RawRow) -> Result<NewCustomer, ValidationError> {
    let name = row.name.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }

    let email = row.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    let age = parse_age(row.age.trim()).ok_or(ValidationError::InvalidAge)?;

    Ok(NewCustomer {
        name: name.to_string(),
        email,
        age,
    })
}

/// Whether `email` has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn parse_age(age: &str) -> Option<i64> {
    age.parse::<i64>()
        .ok()
        .filter(|value| AGE_RANGE.contains(value))
}
