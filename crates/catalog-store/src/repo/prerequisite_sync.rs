//! Prerequisite edge synchronizer
//!
//! Keeps the `course_to_prerequisites` rows of one course equal to the
//! prerequisite list of its latest create/update payload. Edges are written
//! one at a time on the caller's transaction, in payload order.
//!
//! Update policy is wipe-and-recreate: every edge where the course is the
//! dependent is deleted and the payload's edges are inserted again. The
//! per-request `is_deleted` flag has no effect.

use crate::errors::{from_rusqlite, is_constraint_violation, Result};
use crate::repo::course_repo::{from_millis, CourseRepo};
use catalog_core::errors::{ExError, ExErrorKind};
use catalog_core::model::course::now_millis;
use catalog_core::rules::validate_prerequisites;
use catalog_core::{PrerequisiteCourseRequest, PrerequisiteEdge};
use rusqlite::{Connection, Transaction};

/// Insert one edge per request, in order
///
/// Every prerequisite must already exist. The first failure aborts; since
/// nothing is committed here, the caller's transaction rolls back the
/// edges written so far when it is dropped.
///
/// # Errors
/// - `InvalidPrerequisite` / `DuplicatePrerequisite`: payload rules
/// - `ConstraintViolation`: unknown prerequisite id, or the edge already exists
pub fn create_edges(
    tx: &Transaction<'_>,
    course_id: &str,
    requests: &[PrerequisiteCourseRequest],
) -> Result<usize> {
    validate_prerequisites(course_id, requests.iter().map(|r| r.course_id.as_str()))
        .map_err(|e| ExError::from(e).with_op("create_edges").with_entity_id(course_id))?;

    let created_at = now_millis().timestamp_millis();

    for request in requests {
        let pre_requisite_id = request.course_id.as_str();

        if !CourseRepo::course_exists(tx, pre_requisite_id)? {
            return Err(ExError::new(ExErrorKind::ConstraintViolation)
                .with_op("create_edges")
                .with_entity_id(course_id)
                .with_related_id(pre_requisite_id)
                .with_message("prerequisite course does not exist"));
        }

        tx.execute(
            "INSERT INTO course_to_prerequisites (course_id, pre_requisite_id, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![course_id, pre_requisite_id, created_at],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_op("create_edges")
                    .with_entity_id(course_id)
                    .with_related_id(pre_requisite_id)
                    .with_message(e.to_string())
            } else {
                from_rusqlite(e)
            }
        })?;

        tracing::debug!(course_id, pre_requisite_id, "created prerequisite edge");
    }

    Ok(requests.len())
}

/// Make the course's outgoing edges exactly `requests`
pub fn replace_edges(
    tx: &Transaction<'_>,
    course_id: &str,
    requests: &[PrerequisiteCourseRequest],
) -> Result<usize> {
    let removed = tx
        .execute(
            "DELETE FROM course_to_prerequisites WHERE course_id = ?1",
            [course_id],
        )
        .map_err(from_rusqlite)?;
    tracing::debug!(course_id, removed, "cleared prerequisite edges");

    create_edges(tx, course_id, requests)
}

/// Remove every edge touching the course, in either direction
pub fn purge_edges(tx: &Transaction<'_>, course_id: &str) -> Result<usize> {
    let removed = tx
        .execute(
            "DELETE FROM course_to_prerequisites
             WHERE course_id = ?1 OR pre_requisite_id = ?1",
            [course_id],
        )
        .map_err(from_rusqlite)?;
    tracing::debug!(course_id, removed, "purged prerequisite edges");
    Ok(removed)
}

/// Edges where `course_id` is the dependent, in insertion order
pub fn list_edges(conn: &Connection, course_id: &str) -> Result<Vec<PrerequisiteEdge>> {
    let mut stmt = conn
        .prepare(
            "SELECT course_id, pre_requisite_id, created_at
             FROM course_to_prerequisites
             WHERE course_id = ?1
             ORDER BY rowid",
        )
        .map_err(from_rusqlite)?;

    let edges = stmt
        .query_map([course_id], |row| {
            let created_at: i64 = row.get(2)?;
            Ok(PrerequisiteEdge {
                course_id: row.get(0)?,
                pre_requisite_id: row.get(1)?,
                created_at: from_millis(created_at),
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(edges)
}

/// Number of edges touching the course in either direction
pub fn count_edges_touching(conn: &Connection, course_id: &str) -> Result<u64> {
    conn.query_row(
        "SELECT COUNT(*) FROM course_to_prerequisites
         WHERE course_id = ?1 OR pre_requisite_id = ?1",
        [course_id],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as u64)
    .map_err(from_rusqlite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, migrations};
    use catalog_core::Course;

    fn setup_test_db() -> Connection {
        let mut conn = db::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
        conn
    }

    fn seed(conn: &mut Connection, ids: &[&str]) {
        let tx = conn.transaction().unwrap();
        for id in ids {
            let course = Course::new(id.to_string(), format!("Course {}", id), id.to_string(), 3);
            CourseRepo::insert_course_tx(&tx, &course).unwrap();
        }
        tx.commit().unwrap();
    }

    fn requests(ids: &[&str]) -> Vec<PrerequisiteCourseRequest> {
        ids.iter().map(|id| PrerequisiteCourseRequest::new(*id)).collect()
    }

    fn edge_targets(conn: &Connection, course_id: &str) -> Vec<String> {
        list_edges(conn, course_id)
            .unwrap()
            .into_iter()
            .map(|e| e.pre_requisite_id)
            .collect()
    }

    #[test]
    fn test_create_edges_in_order() {
        let mut conn = setup_test_db();
        seed(&mut conn, &["x", "a", "b", "c"]);

        let tx = conn.transaction().unwrap();
        assert_eq!(create_edges(&tx, "x", &requests(&["c", "a", "b"])).unwrap(), 3);
        tx.commit().unwrap();

        assert_eq!(edge_targets(&conn, "x"), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unknown_prerequisite_is_constraint_violation() {
        let mut conn = setup_test_db();
        seed(&mut conn, &["x", "a"]);

        let tx = conn.transaction().unwrap();
        let err = create_edges(&tx, "x", &requests(&["a", "ghost"])).unwrap_err();
        drop(tx);

        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
        assert_eq!(err.related_id(), Some("ghost"));
        assert!(edge_targets(&conn, "x").is_empty());
    }

    #[test]
    fn test_self_loop_rejected_before_write() {
        let mut conn = setup_test_db();
        seed(&mut conn, &["x"]);

        let tx = conn.transaction().unwrap();
        let err = create_edges(&tx, "x", &requests(&["x"])).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPrerequisite);
        assert_eq!(err.entity_id(), Some("x"));
    }

    #[test]
    fn test_existing_edge_is_constraint_violation() {
        let mut conn = setup_test_db();
        seed(&mut conn, &["x", "a"]);

        let tx = conn.transaction().unwrap();
        create_edges(&tx, "x", &requests(&["a"])).unwrap();
        let err = create_edges(&tx, "x", &requests(&["a"])).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_replace_edges_drops_unlisted() {
        let mut conn = setup_test_db();
        seed(&mut conn, &["x", "a", "b", "c"]);

        let tx = conn.transaction().unwrap();
        create_edges(&tx, "x", &requests(&["a", "b"])).unwrap();
        replace_edges(&tx, "x", &requests(&["c"])).unwrap();
        tx.commit().unwrap();

        assert_eq!(edge_targets(&conn, "x"), vec!["c"]);
    }

    #[test]
    fn test_purge_edges_covers_both_directions() {
        let mut conn = setup_test_db();
        seed(&mut conn, &["x", "a", "d"]);

        let tx = conn.transaction().unwrap();
        create_edges(&tx, "x", &requests(&["a"])).unwrap();
        create_edges(&tx, "d", &requests(&["x", "a"])).unwrap();
        assert_eq!(purge_edges(&tx, "x").unwrap(), 2);
        tx.commit().unwrap();

        assert_eq!(count_edges_touching(&conn, "x").unwrap(), 0);
        assert_eq!(edge_targets(&conn, "d"), vec!["a"]);
    }
}
