//! Team infrastructure implementations

mod in_memory;
mod postgres_repository;
mod service;

pub use in_memory::InMemoryTeamRepository;
pub use postgres_repository::PostgresTeamRepository;
pub use service::{CreateTeamRequest, TeamService, UpdateTeamRequest};
