//! Application services: repository contracts plus the per-resource
//! services that wrap transactional writes with cache invalidation.

pub mod dashboard;
pub mod error;
pub mod repos;
pub mod settings;
pub mod steps;
pub mod users;
pub mod workouts;
