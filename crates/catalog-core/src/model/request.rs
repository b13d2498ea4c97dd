use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a course create or update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreateData {
    pub title: String,
    pub code: String,
    pub credits: u32,
    #[serde(default)]
    pub pre_requisite_courses: Vec<PrerequisiteCourseRequest>,
}

impl CourseCreateData {
    pub fn new(title: impl Into<String>, code: impl Into<String>, credits: u32) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            credits,
            pre_requisite_courses: Vec::new(),
        }
    }

    /// Append a prerequisite request
    pub fn with_prerequisite(mut self, course_id: impl Into<String>) -> Self {
        self.pre_requisite_courses
            .push(PrerequisiteCourseRequest::new(course_id));
        self
    }

    /// Prerequisite ids in request order
    pub fn prerequisite_ids(&self) -> impl Iterator<Item = &str> {
        self.pre_requisite_courses
            .iter()
            .map(|p| p.course_id.as_str())
    }
}

/// One entry of `preRequisiteCourses`
///
/// `is_deleted` is accepted for wire compatibility. Updates replace the
/// whole edge set, so the flag does not change what gets written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteCourseRequest {
    pub course_id: String,
    #[serde(default)]
    pub is_deleted: bool,
}

impl PrerequisiteCourseRequest {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            is_deleted: false,
        }
    }
}

/// List filters: free-text search plus exact-match field filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFilterRequest {
    pub search_term: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl CourseFilterRequest {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}
