//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty.")]
    EmptyName,

    #[error("League cannot be empty.")]
    EmptyLeague,

    #[error("Country cannot be empty.")]
    EmptyCountry,

    #[error("Search text cannot be empty.")]
    EmptySearchText,

    #[error("Team ID must be a positive integer, got '{0}'")]
    InvalidId(String),
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if is_blank(name) {
        return Err(TeamValidationError::EmptyName);
    }

    Ok(())
}

/// Validate a league name
pub fn validate_league(league: &str) -> Result<(), TeamValidationError> {
    if is_blank(league) {
        return Err(TeamValidationError::EmptyLeague);
    }

    Ok(())
}

/// Validate a country name
pub fn validate_country(country: &str) -> Result<(), TeamValidationError> {
    if is_blank(country) {
        return Err(TeamValidationError::EmptyCountry);
    }

    Ok(())
}

/// Validate the text of a name search.
///
/// Whitespace is a legitimate substring, so only the empty string is rejected.
pub fn validate_search_text(text: &str) -> Result<(), TeamValidationError> {
    if text.is_empty() {
        return Err(TeamValidationError::EmptySearchText);
    }

    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
