//! stridelog: a self-hosted fitness tracking backend.
//!
//! Layers, leaf to root:
//! - `domain`: persisted record types and closed enumerations.
//! - `cache`: key derivation, TTL key-value store, and the single
//!   read-through / invalidate-on-write orchestrator.
//! - `application`: repository traits and the per-resource services that
//!   wrap transactional writes with cache invalidation.
//! - `infra`: Postgres repositories, the HTTP surface, and telemetry.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
