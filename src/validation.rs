//! Field-level validation for films and users.
//!
//! Pure checks with no side effects; callers run them before any mutation so
//! a rejected payload leaves storage untouched. The display-name default fill
//! is a separate normalization step, not a validation failure.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::models::{Film, User};

/// Longest allowed film description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Raised when a film or user payload violates a field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Date of the first public film screening; no film can predate it.
#[must_use]
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid calendar date")
}

/// Checks the film field constraints: non-blank name, description length,
/// positive duration, release date not before 1895-12-28 (inclusive bound).
pub fn validate_film(film: &Film) -> Result<(), ValidationError> {
    if film.name.trim().is_empty() {
        return Err(ValidationError::new("Film name cannot be blank"));
    }
    if film.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::new(format!(
            "Film description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    if film.duration <= 0 {
        return Err(ValidationError::new(format!(
            "Film duration must be positive, got {}",
            film.duration
        )));
    }
    if film.release_date < earliest_release_date() {
        return Err(ValidationError::new(format!(
            "Release date {} is before the first film screening on {}",
            film.release_date,
            earliest_release_date()
        )));
    }
    Ok(())
}

/// Checks the user field constraints: email contains `@`, login is non-blank
/// and whitespace-free, birthday is not in the future.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    if user.email.trim().is_empty() || !user.email.contains('@') {
        return Err(ValidationError::new(
            "Email cannot be blank and must contain '@'",
        ));
    }
    if user.login.trim().is_empty() || user.login.chars().any(char::is_whitespace) {
        return Err(ValidationError::new(
            "Login cannot be blank or contain whitespace",
        ));
    }
    if user.birthday > Utc::now().date_naive() {
        return Err(ValidationError::new(format!(
            "Birthday {} cannot be in the future",
            user.birthday
        )));
    }
    Ok(())
}

/// Fills in the display name from the login when it was left blank.
pub fn fill_default_display_name(user: &mut User) {
    if user.name.trim().is_empty() {
        user.name = user.login.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilmId, UserId};
    use chrono::Days;
    use std::collections::BTreeSet;

    fn film() -> Film {
        Film {
            id: FilmId::default(),
            name: "Matrix".to_string(),
            description: "A hacker learns the truth.".to_string(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            duration: 136,
            mpa: None,
            genres: Vec::new(),
            likes: BTreeSet::new(),
        }
    }

    fn user() -> User {
        User {
            id: UserId::default(),
            email: "neo@matrix.io".to_string(),
            login: "neo".to_string(),
            name: "Thomas".to_string(),
            birthday: NaiveDate::from_ymd_opt(1962, 3, 11).unwrap(),
            friends: BTreeSet::new(),
        }
    }

    #[test]
    fn valid_film_passes() {
        assert!(validate_film(&film()).is_ok());
    }

    #[test]
    fn blank_film_name_fails() {
        let mut f = film();
        f.name = "   ".to_string();
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn description_boundary() {
        let mut f = film();
        f.description = "x".repeat(200);
        assert!(validate_film(&f).is_ok());
        f.description.push('x');
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn non_positive_duration_fails() {
        let mut f = film();
        f.duration = 0;
        assert!(validate_film(&f).is_err());
        f.duration = -5;
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn release_date_lower_bound_is_inclusive() {
        let mut f = film();
        f.release_date = earliest_release_date();
        assert!(validate_film(&f).is_ok());
        f.release_date = earliest_release_date().pred_opt().unwrap();
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate_user(&user()).is_ok());
    }

    #[test]
    fn email_without_at_fails() {
        let mut u = user();
        u.email = "neo.matrix.io".to_string();
        assert!(validate_user(&u).is_err());
        u.email = String::new();
        assert!(validate_user(&u).is_err());
    }

    #[test]
    fn login_with_whitespace_fails() {
        let mut u = user();
        u.login = "the one".to_string();
        assert!(validate_user(&u).is_err());
        u.login = String::new();
        assert!(validate_user(&u).is_err());
    }

    #[test]
    fn future_birthday_fails() {
        let mut u = user();
        u.birthday = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap();
        assert!(validate_user(&u).is_err());
    }

    #[test]
    fn today_is_a_valid_birthday() {
        let mut u = user();
        u.birthday = Utc::now().date_naive();
        assert!(validate_user(&u).is_ok());
    }

    #[test]
    fn blank_name_defaults_to_login() {
        let mut u = user();
        u.name = String::new();
        fill_default_display_name(&mut u);
        assert_eq!(u.name, "neo");

        let mut named = user();
        fill_default_display_name(&mut named);
        assert_eq!(named.name, "Thomas");
    }
}
