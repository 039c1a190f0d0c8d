//! # guard-db
//!
//! Storage layer implementing the repository traits from `guard-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap for PostgreSQL
//! - Database models with SQLx `FromRow` derives and model → entity mappers
//! - PostgreSQL repositories (atomic warning increment, transactional ban)
//! - In-memory repositories with the same semantics, for development and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guard_db::pool::{create_pool, ensure_schema, DatabaseConfig};
//! use guard_db::repositories::PgOffenderRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     ensure_schema(&pool).await?;
//!     let offenders = PgOffenderRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryBanRepository, InMemoryOffenderRepository, InMemoryStore};
pub use pool::{create_pool, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{PgBanRepository, PgOffenderRepository};
