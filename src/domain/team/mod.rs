//! Team domain module
//!
//! A team is the only record the service manages: a name that is unique
//! ignoring case, plus the league and country it plays in.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamDetails, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    validate_country, validate_league, validate_search_text, validate_team_name,
    TeamValidationError,
};

#[cfg(test)]
pub use repository::mock;
