//! Catalog Engine - service operations over the course catalog
//!
//! Coordinates payload rules from catalog-core with the repositories in
//! catalog-store. Every public operation runs its writes in one transaction
//! and owns the start/end/error log events for that operation.

pub mod commands;

pub use commands::course::{
    delete_from_db, get_all_from_db, get_data_by_id, insert_into_db, require_found,
    update_one_in_db,
};
