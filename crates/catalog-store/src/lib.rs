//! Catalog Store - SQLite persistence for courses and prerequisite edges
//!
//! Provides:
//! - Connection management and store configuration
//! - Embedded SQL migrations with checksums
//! - Course repository, prerequisite edge synchronizer and course queries

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use config::StoreConfig;
pub use errors::Result;
