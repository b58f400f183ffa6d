//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain types;
//! lifecycle rules stay in the domain. Connections come from a `bb8` pool
//! through `diesel-async`, and every database failure is mapped onto the
//! port's typed error.
//!
//! # Example
//!
//! ```ignore
//! use techfix::outbound::persistence::{DbPool, DieselRepairRequestRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/techfix")).await?;
//! let repo = DieselRepairRequestRepository::new(pool);
//! ```

mod diesel_admin_account_repository;
mod diesel_basic_error_mapping;
mod diesel_repair_request_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_admin_account_repository::DieselAdminAccountRepository;
pub use diesel_repair_request_repository::DieselRepairRequestRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
