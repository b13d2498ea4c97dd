pub mod prerequisites;

pub use prerequisites::{validate_course_fields, validate_course_payload, validate_prerequisites};
