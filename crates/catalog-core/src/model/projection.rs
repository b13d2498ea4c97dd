//! Expanded course projection returned by every read and write operation

use serde::{Deserialize, Serialize};

use super::course::Course;

/// A course with both edge directions resolved
///
/// `pre_requisite` goes two hops (edge, prerequisite course, and that
/// course's own prerequisites); `pre_requisite_for` goes one hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub pre_requisite: Vec<PrerequisiteLink>,
    pub pre_requisite_for: Vec<DependentLink>,
}

impl CourseDetail {
    pub fn id(&self) -> &str {
        &self.course.id
    }

    /// Ids of the courses this course requires, in edge order
    pub fn prerequisite_ids(&self) -> Vec<&str> {
        self.pre_requisite
            .iter()
            .map(|l| l.pre_requisite_id.as_str())
            .collect()
    }

    /// Ids of the courses that require this course
    pub fn dependent_ids(&self) -> Vec<&str> {
        self.pre_requisite_for
            .iter()
            .map(|l| l.course_id.as_str())
            .collect()
    }
}

/// Edge where the projected course is the dependent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteLink {
    pub course_id: String,
    pub pre_requisite_id: String,
    pub pre_requisite: PrerequisiteCourse,
}

/// Prerequisite course plus its own prerequisites (second hop)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteCourse {
    #[serde(flatten)]
    pub course: Course,
    pub pre_requisite: Vec<Course>,
}

/// Edge where the projected course is the prerequisite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentLink {
    pub course_id: String,
    pub pre_requisite_id: String,
    pub course: Course,
}
