//! Infrastructure layer - Store, auth and logging implementations

pub mod auth;
pub mod logging;
pub mod storage;
pub mod team;
