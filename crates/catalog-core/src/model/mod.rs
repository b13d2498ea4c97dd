pub mod course;
pub mod edge;
pub mod projection;
pub mod request;

pub use course::{Course, CourseField};
pub use edge::PrerequisiteEdge;
pub use projection::{CourseDetail, DependentLink, PrerequisiteCourse, PrerequisiteLink};
pub use request::{CourseCreateData, CourseFilterRequest, PrerequisiteCourseRequest};
