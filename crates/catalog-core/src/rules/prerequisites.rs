use std::collections::HashSet;

use crate::errors::{CatalogError, Result};
use crate::model::CourseCreateData;

/// Validate a create/update payload before any write
///
/// `course_id` is the id of the course being written. On create it is the
/// freshly assigned id, on update the path id. Checks, in order:
///
/// 1. `title` and `code` are non-blank, `credits` is positive
/// 2. every prerequisite id is non-blank
/// 3. no prerequisite id equals `course_id`
/// 4. no prerequisite id is listed twice
///
/// # Errors
/// Returns the first violation found.
pub fn validate_course_payload(course_id: &str, data: &CourseCreateData) -> Result<()> {
    validate_course_fields(data)?;
    validate_prerequisites(course_id, data.prerequisite_ids())
}

/// Scalar field rules only
pub fn validate_course_fields(data: &CourseCreateData) -> Result<()> {
    if data.title.trim().is_empty() {
        return Err(CatalogError::InvalidField {
            field: "title".to_string(),
            reason: "cannot be empty".to_string(),
        });
    }
    if data.code.trim().is_empty() {
        return Err(CatalogError::InvalidField {
            field: "code".to_string(),
            reason: "cannot be empty".to_string(),
        });
    }
    if data.credits == 0 {
        return Err(CatalogError::InvalidField {
            field: "credits".to_string(),
            reason: "must be a positive integer".to_string(),
        });
    }
    Ok(())
}

/// Prerequisite list rules only
///
/// Also called by the store's edge synchronizer right before it writes, so
/// the rules hold even for callers that skip `validate_course_payload`.
pub fn validate_prerequisites<'a, I>(course_id: &str, pre_requisite_ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();

    for (index, pre_requisite_id) in pre_requisite_ids.into_iter().enumerate() {
        if pre_requisite_id.trim().is_empty() {
            return Err(CatalogError::BlankPrerequisiteId { index });
        }
        if pre_requisite_id == course_id {
            return Err(CatalogError::SelfPrerequisite {
                course_id: course_id.to_string(),
            });
        }
        if !seen.insert(pre_requisite_id) {
            return Err(CatalogError::DuplicatePrerequisite {
                pre_requisite_id: pre_requisite_id.to_string(),
            });
        }
    }

    Ok(())
}
