use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directed prerequisite edge: `course_id` requires `pre_requisite_id`
///
/// `(course_id, pre_requisite_id)` is unique and the two ids never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteEdge {
    pub course_id: String,
    pub pre_requisite_id: String,
    pub created_at: DateTime<Utc>,
}
