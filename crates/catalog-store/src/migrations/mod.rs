//! Migration framework
//!
//! - Embedded SQL migrations, applied in order
//! - SHA-256 checksums recorded per migration and verified on every run
//! - Idempotent application

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_migrations;
