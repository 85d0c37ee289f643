#![forbid(unsafe_code)]

//! Sign-in validation.
//!
//! Checks run in a fixed order and stop at the first failure, so the form
//! surfaces exactly one error at a time. The contact field accepts an
//! email address or a US phone number; phone input is matched on its
//! digits only, so formatting like `555-123-4567` or `(555) 123 4567`
//! is accepted.

use std::fmt;

/// Why a sign-in attempt was rejected. One per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingContact,
    InvalidContact,
    IncompleteDob,
    InvalidMonth,
    InvalidDay,
    InvalidYear,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AuthError::MissingContact => "Please enter your phone number or email address",
            AuthError::InvalidContact => {
                "Please enter a valid email address or 10-digit phone number"
            }
            AuthError::IncompleteDob => "Please enter your complete date of birth",
            AuthError::InvalidMonth => "Please enter a valid month (1-12)",
            AuthError::InvalidDay => "Please enter a valid day (1-31)",
            AuthError::InvalidYear => "Please enter a valid year",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for AuthError {}

/// Validate the sign-in form. `current_year` bounds the DOB year.
///
/// Order: contact presence, contact shape, DOB completeness, then month,
/// day, year ranges. First failure wins.
pub fn validate_sign_in(
    contact: &str,
    dob_month: &str,
    dob_day: &str,
    dob_year: &str,
    current_year: i32,
) -> Result<(), AuthError> {
    let contact = contact.trim();
    if contact.is_empty() {
        return Err(AuthError::MissingContact);
    }
    if !is_email(contact) && !is_phone(contact) {
        return Err(AuthError::InvalidContact);
    }

    let (month, day, year) = (dob_month.trim(), dob_day.trim(), dob_year.trim());
    if month.is_empty() || day.is_empty() || year.is_empty() {
        return Err(AuthError::IncompleteDob);
    }
    if !parses_in_range(month, 1, 12) {
        return Err(AuthError::InvalidMonth);
    }
    if !parses_in_range(day, 1, 31) {
        return Err(AuthError::InvalidDay);
    }
    if !parses_in_range(year, 1900, current_year) {
        return Err(AuthError::InvalidYear);
    }
    Ok(())
}

fn parses_in_range(field: &str, min: i32, max: i32) -> bool {
    field.parse::<i32>().is_ok_and(|n| n >= min && n <= max)
}

/// `local@domain` where neither side contains whitespace or a second `@`,
/// and the domain has an interior dot.
fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if s.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    domain
        .bytes()
        .enumerate()
        .any(|(i, b)| b == b'.' && i > 0 && i + 1 < domain.len())
}

/// Exactly ten digits once formatting characters are stripped.
fn is_phone(s: &str) -> bool {
    s.chars().filter(char::is_ascii_digit).count() == 10
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2025;

    fn check(contact: &str, m: &str, d: &str, y: &str) -> Result<(), AuthError> {
        validate_sign_in(contact, m, d, y, YEAR)
    }

    #[test]
    fn empty_contact_wins_over_everything() {
        assert_eq!(check("", "", "", ""), Err(AuthError::MissingContact));
        assert_eq!(check("   ", "99", "99", "99"), Err(AuthError::MissingContact));
    }

    #[test]
    fn malformed_contact_is_second() {
        assert_eq!(
            check("not-an-email", "", "", ""),
            Err(AuthError::InvalidContact)
        );
        assert_eq!(check("12345", "7", "21", "1985"), Err(AuthError::InvalidContact));
    }

    #[test]
    fn phone_numbers_match_on_digits_only() {
        for contact in [
            "555-123-4567",
            "(555) 123-4567",
            "5551234567",
            "555.123.4567",
            "555 123 4567",
        ] {
            assert_eq!(check(contact, "7", "21", "1985"), Ok(()));
        }
        assert_eq!(check("555-123-456", "7", "21", "1985"), Err(AuthError::InvalidContact));
        assert_eq!(
            check("555-123-45678", "7", "21", "1985"),
            Err(AuthError::InvalidContact)
        );
    }

    #[test]
    fn email_shapes() {
        assert_eq!(check("abby@example.com", "7", "21", "1985"), Ok(()));
        assert_eq!(check("a@b.co", "7", "21", "1985"), Ok(()));
        for bad in ["abby@example", "@example.com", "abby@", "ab by@example.com", "abby@@ex.com", "abby@.com", "abby@com."] {
            assert_eq!(check(bad, "7", "21", "1985"), Err(AuthError::InvalidContact), "{bad}");
        }
    }

    #[test]
    fn incomplete_dob_before_range_checks() {
        assert_eq!(
            check("abby@example.com", "", "21", "1985"),
            Err(AuthError::IncompleteDob)
        );
        assert_eq!(
            check("abby@example.com", "7", "", "1985"),
            Err(AuthError::IncompleteDob)
        );
        assert_eq!(
            check("abby@example.com", "7", "21", ""),
            Err(AuthError::IncompleteDob)
        );
    }

    #[test]
    fn month_day_year_ranges_in_order() {
        assert_eq!(
            check("abby@example.com", "0", "99", "1800"),
            Err(AuthError::InvalidMonth)
        );
        assert_eq!(
            check("abby@example.com", "13", "21", "1985"),
            Err(AuthError::InvalidMonth)
        );
        assert_eq!(
            check("abby@example.com", "12", "32", "1800"),
            Err(AuthError::InvalidDay)
        );
        assert_eq!(
            check("abby@example.com", "12", "0", "1985"),
            Err(AuthError::InvalidDay)
        );
        assert_eq!(
            check("abby@example.com", "12", "31", "1899"),
            Err(AuthError::InvalidYear)
        );
        assert_eq!(
            check("abby@example.com", "12", "31", "2026"),
            Err(AuthError::InvalidYear)
        );
        assert_eq!(check("abby@example.com", "12", "31", "2025"), Ok(()));
        assert_eq!(check("abby@example.com", "1", "1", "1900"), Ok(()));
    }

    #[test]
    fn non_numeric_dob_fields_are_invalid() {
        assert_eq!(
            check("abby@example.com", "july", "21", "1985"),
            Err(AuthError::InvalidMonth)
        );
        assert_eq!(
            check("abby@example.com", "7", "2x", "1985"),
            Err(AuthError::InvalidDay)
        );
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            AuthError::MissingContact.to_string(),
            "Please enter your phone number or email address"
        );
        assert_eq!(
            AuthError::InvalidContact.to_string(),
            "Please enter a valid email address or 10-digit phone number"
        );
        assert_eq!(
            AuthError::IncompleteDob.to_string(),
            "Please enter your complete date of birth"
        );
        assert_eq!(AuthError::InvalidMonth.to_string(), "Please enter a valid month (1-12)");
        assert_eq!(AuthError::InvalidDay.to_string(), "Please enter a valid day (1-31)");
        assert_eq!(AuthError::InvalidYear.to_string(), "Please enter a valid year");
    }
}
