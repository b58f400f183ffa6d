//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: process-local repositories for development and tests.
//!
//! Adapters convert between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
