//! Repository layer for courses and their prerequisite edges
//!
//! - `course_repo`: course rows
//! - `prerequisite_sync`: edge rows, kept in step with course writes
//! - `course_query`: filtered/paginated reads with edges expanded

pub mod course_query;
pub mod course_repo;
pub mod prerequisite_sync;

pub use course_repo::CourseRepo;
