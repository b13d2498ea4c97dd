//! Read side: courses with both edge directions expanded
//!
//! List and count queries share one `CourseWhere` so that `meta.total`
//! always counts exactly the rows the list query pages over.

use crate::db::FOLD_FN;
use crate::errors::{from_rusqlite, Result};
use crate::repo::course_repo::{row_to_course, COURSE_COLUMNS};
use catalog_core::errors::ExError;
use catalog_core::model::{DependentLink, PrerequisiteCourse, PrerequisiteLink};
use catalog_core::{
    Course, CourseDetail, CourseField, CourseFilterRequest, GenericResponse, PageMeta, Pagination,
};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// WHERE clause (possibly empty) plus its positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseWhere {
    sql: String,
    params: Vec<Value>,
}

impl CourseWhere {
    /// Build the filter for a list request
    ///
    /// `search_term` matches any searchable field by case-insensitive
    /// substring; each other field must equal its value case-insensitively.
    /// All groups are AND-ed. Both sides of every comparison go through
    /// `FOLD_FN`, so case folding follows Unicode rules rather than ASCII.
    ///
    /// # Errors
    /// `InvalidInput` when a filter names a field that is not filterable.
    pub fn from_filters(filters: &CourseFilterRequest) -> Result<Self> {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(term) = filters.search_term.as_deref().filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            let any_field = CourseField::SEARCHABLE
                .iter()
                .map(|field| {
                    format!(
                        "{fold}(c.{col}) LIKE {fold}(?) ESCAPE '\\'",
                        fold = FOLD_FN,
                        col = field.column()
                    )
                })
                .collect::<Vec<_>>()
                .join(" OR ");
            clauses.push(format!("({})", any_field));
            params.extend(CourseField::SEARCHABLE.iter().map(|_| Value::Text(pattern.clone())));
        }

        for (name, value) in &filters.fields {
            let field = CourseField::filterable(name)
                .map_err(|e| ExError::from(e).with_op("build_course_filter"))?;
            clauses.push(format!(
                "{fold}(CAST(c.{col} AS TEXT)) = {fold}(?)",
                fold = FOLD_FN,
                col = field.column()
            ));
            params.push(Value::Text(value.clone()));
        }

        let sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        Ok(Self { sql, params })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Make `%`, `_` and the escape character itself match literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Number of courses matching `filter`
pub fn count_courses(conn: &Connection, filter: &CourseWhere) -> Result<u64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM courses c {}", filter.sql()),
        params_from_iter(filter.params()),
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as u64)
    .map_err(from_rusqlite)
}

/// One page of course rows matching `filter`
pub fn list_courses(
    conn: &Connection,
    filter: &CourseWhere,
    pagination: &Pagination,
) -> Result<Vec<Course>> {
    let order = pagination.sort_order.as_sql();
    let sql = format!(
        "SELECT {} FROM courses c {} ORDER BY c.{} {}, c.id {} LIMIT ? OFFSET ?",
        COURSE_COLUMNS,
        filter.sql(),
        pagination.sort_by.column(),
        order,
        order,
    );

    let mut params = filter.params().to_vec();
    params.push(Value::Integer(i64::from(pagination.limit)));
    params.push(Value::Integer(
        i64::try_from(pagination.skip).unwrap_or(i64::MAX),
    ));

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let courses = stmt
        .query_map(params_from_iter(params.iter()), |row| row_to_course(row, 0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(courses)
}

/// Page of expanded courses plus the total matching the same filter
pub fn find_course_details(
    conn: &Connection,
    filters: &CourseFilterRequest,
    pagination: &Pagination,
) -> Result<GenericResponse<CourseDetail>> {
    let filter = CourseWhere::from_filters(filters)?;

    let data = list_courses(conn, &filter, pagination)?
        .into_iter()
        .map(|course| expand(conn, course))
        .collect::<Result<Vec<_>>>()?;
    let total = count_courses(conn, &filter)?;

    Ok(GenericResponse {
        meta: PageMeta {
            total,
            page: pagination.page,
            limit: pagination.limit,
        },
        data,
    })
}

/// Expanded course by id; `None` when no such course exists
pub fn find_course_detail(conn: &Connection, id: &str) -> Result<Option<CourseDetail>> {
    match crate::repo::CourseRepo::get_course(conn, id)? {
        Some(course) => expand(conn, course).map(Some),
        None => Ok(None),
    }
}

fn expand(conn: &Connection, course: Course) -> Result<CourseDetail> {
    let pre_requisite = prerequisite_links(conn, &course.id)?;
    let pre_requisite_for = dependent_links(conn, &course.id)?;
    Ok(CourseDetail {
        course,
        pre_requisite,
        pre_requisite_for,
    })
}

/// Courses that `course_id` requires, in edge order
pub fn prerequisite_courses(conn: &Connection, course_id: &str) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM course_to_prerequisites e
             JOIN courses c ON c.id = e.pre_requisite_id
             WHERE e.course_id = ?1
             ORDER BY e.rowid",
            COURSE_COLUMNS
        ))
        .map_err(from_rusqlite)?;

    let courses = stmt
        .query_map([course_id], |row| row_to_course(row, 0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(courses)
}

fn prerequisite_links(conn: &Connection, course_id: &str) -> Result<Vec<PrerequisiteLink>> {
    prerequisite_courses(conn, course_id)?
        .into_iter()
        .map(|course| {
            let second_hop = prerequisite_courses(conn, &course.id)?;
            Ok(PrerequisiteLink {
                course_id: course_id.to_string(),
                pre_requisite_id: course.id.clone(),
                pre_requisite: PrerequisiteCourse {
                    course,
                    pre_requisite: second_hop,
                },
            })
        })
        .collect()
}

fn dependent_links(conn: &Connection, course_id: &str) -> Result<Vec<DependentLink>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM course_to_prerequisites e
             JOIN courses c ON c.id = e.course_id
             WHERE e.pre_requisite_id = ?1
             ORDER BY e.rowid",
            COURSE_COLUMNS
        ))
        .map_err(from_rusqlite)?;

    let links = stmt
        .query_map([course_id], |row| {
            let course = row_to_course(row, 0)?;
            Ok(DependentLink {
                course_id: course.id.clone(),
                pre_requisite_id: course_id.to_string(),
                course,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where() {
        let filter = CourseWhere::from_filters(&CourseFilterRequest::default()).unwrap();
        assert_eq!(filter.sql(), "");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_search_term_binds_one_pattern_per_field() {
        let filter = CourseWhere::from_filters(&CourseFilterRequest::search("Algo")).unwrap();
        assert!(filter.sql().contains(" OR "));
        assert_eq!(
            filter.params(),
            &[
                Value::Text("%Algo%".to_string()),
                Value::Text("%Algo%".to_string())
            ]
        );
    }

    #[test]
    fn test_field_filters_are_and_combined() {
        let filters = CourseFilterRequest::search("a")
            .with_field("code", "CSE-220")
            .with_field("credits", "3");
        let filter = CourseWhere::from_filters(&filters).unwrap();
        assert_eq!(filter.sql().matches(" AND ").count(), 2);
        assert_eq!(filter.params().len(), 4);
    }

    #[test]
    fn test_unknown_filter_field_rejected() {
        let filters = CourseFilterRequest::default().with_field("1=1; --", "x");
        let err = CourseWhere::from_filters(&filters).unwrap_err();
        assert_eq!(err.kind(), catalog_core::ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_like_wildcards_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
