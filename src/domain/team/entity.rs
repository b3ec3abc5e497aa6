//! Team entity and related types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{
    validate_country, validate_league, validate_team_name, TeamValidationError,
};

/// Store-assigned team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    /// Wrap a raw identifier handed out by a store
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for TeamId {
    type Err = TeamValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(TeamValidationError::InvalidId(s.to_string())),
        }
    }
}

impl From<TeamId> for i64 {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The mutable, user-supplied part of a team.
///
/// A `TeamDetails` value is always fully defined: constructing one runs the
/// field checks in order (name, league, country) and the first failure wins.
/// Values are kept exactly as given; trimming only decides emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDetails {
    name: String,
    league: String,
    country: String,
}

impl TeamDetails {
    /// Validate and build team details
    pub fn new(
        name: impl Into<String>,
        league: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        let league = league.into();
        let country = country.into();

        validate_team_name(&name)?;
        validate_league(&league)?;
        validate_country(&country)?;

        Ok(Self {
            name,
            league,
            country,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name, unique ignoring case
    name: String,
    /// League the team plays in
    league: String,
    /// Country of the team
    country: String,
}

impl Team {
    /// Build a persisted team from its store-assigned id and validated details
    pub fn new(id: TeamId, details: TeamDetails) -> Self {
        Self {
            id,
            name: details.name,
            league: details.league,
            country: details.country,
        }
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Whether this team's name equals `name` ignoring case
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Whether this team's name contains `text` ignoring case
    pub fn name_contains(&self, text: &str) -> bool {
        self.name.to_lowercase().contains(&text.to_lowercase())
    }

    // Mutators

    /// Overwrite name, league and country; the id is untouched
    pub fn apply(&mut self, details: TeamDetails) {
        self.name = details.name;
        self.league = details.league;
        self.country = details.country;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(name: &str, league: &str, country: &str) -> TeamDetails {
        TeamDetails::new(name, league, country).unwrap()
    }

    #[test]
    fn test_team_id_parse() {
        let id: TeamId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!("".parse::<TeamId>().is_err());
        assert!("abc".parse::<TeamId>().is_err());
        assert!("0".parse::<TeamId>().is_err());
        assert!("-3".parse::<TeamId>().is_err());
    }

    #[test]
    fn test_details_validation_order() {
        assert_eq!(
            TeamDetails::new("", "", ""),
            Err(TeamValidationError::EmptyName)
        );
        assert_eq!(
            TeamDetails::new("Boca Juniors", " ", ""),
            Err(TeamValidationError::EmptyLeague)
        );
        assert_eq!(
            TeamDetails::new("Boca Juniors", "Liga Profesional", "\t"),
            Err(TeamValidationError::EmptyCountry)
        );
    }

    #[test]
    fn test_details_keep_values_as_given() {
        let d = details(" Real Madrid ", "La Liga", "Spain");
        assert_eq!(d.name(), " Real Madrid ");
    }

    #[test]
    fn test_team_creation() {
        let team = Team::new(TeamId::new(1), details("Real Madrid", "La Liga", "Spain"));

        assert_eq!(team.id().value(), 1);
        assert_eq!(team.name(), "Real Madrid");
        assert_eq!(team.league(), "La Liga");
        assert_eq!(team.country(), "Spain");
    }

    #[test]
    fn test_name_matching_ignores_case() {
        let team = Team::new(TeamId::new(1), details("Real Madrid", "La Liga", "Spain"));

        assert!(team.has_name("REAL MADRID"));
        assert!(!team.has_name("Real"));
        assert!(team.name_contains("madr"));
        assert!(!team.name_contains("barcelona"));
    }

    #[test]
    fn test_apply_preserves_id() {
        let mut team = Team::new(TeamId::new(9), details("Real Madrid", "La Liga", "Spain"));
        team.apply(details("Juventus", "Serie A", "Italy"));

        assert_eq!(team.id().value(), 9);
        assert_eq!(team.name(), "Juventus");
        assert_eq!(team.league(), "Serie A");
        assert_eq!(team.country(), "Italy");
    }
}
