//! Catalog Core - domain model and shared facilities for the course catalog
//!
//! This crate provides:
//! - Course, prerequisite edge and expanded projection models
//! - Inbound payload types and the prerequisite payload rules
//! - Pagination and sort option handling
//! - The structured error facility (`ExError`) and domain errors (`CatalogError`)
//! - The logging facility (`init`, `log_op_*` macros, test capture)

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod pagination;
pub mod rules;

// Used by the exported logging macros
#[doc(hidden)]
pub use catalog_core_types;
#[doc(hidden)]
pub use tracing;

pub use errors::{CatalogError, ExError, ExErrorKind, Result};
pub use model::{
    Course, CourseCreateData, CourseDetail, CourseField, CourseFilterRequest,
    PrerequisiteCourseRequest, PrerequisiteEdge,
};
pub use pagination::{GenericResponse, PageMeta, Pagination, PaginationOptions, SortOrder};
