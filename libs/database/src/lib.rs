//! PostgreSQL connection layer built on SeaORM.
//!
//! Provides pool configuration, connect helpers with retry, migration
//! running, and a health check suitable for readiness probes.
//!
//! # Features
//!
//! - `config` - load `PostgresConfig` from the environment via
//!   `core_config::FromEnv`

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
