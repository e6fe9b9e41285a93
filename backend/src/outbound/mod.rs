//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories for development and tests.
//! - **security**: Argon2 password hashing and JWT bearer tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
