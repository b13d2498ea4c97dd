//! Course rows
//!
//! Write methods take a `Transaction`: course writes only happen as one
//! step of a larger unit that also touches the edge table. A transaction
//! mutably borrows its connection, so it cannot be shared between
//! concurrent operations.

use crate::errors::{from_rusqlite, Result};
use catalog_core::model::course::now_millis;
use catalog_core::{Course, CourseCreateData};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, Transaction};

/// Column list matching `row_to_course`, qualified with alias `c`
pub(crate) const COURSE_COLUMNS: &str = "c.id, c.title, c.code, c.credits, c.created_at, c.updated_at";

/// Map six consecutive course columns starting at `offset`
pub(crate) fn row_to_course(row: &Row<'_>, offset: usize) -> rusqlite::Result<Course> {
    let created_at: i64 = row.get(offset + 4)?;
    let updated_at: i64 = row.get(offset + 5)?;
    Ok(Course {
        id: row.get(offset)?,
        title: row.get(offset + 1)?,
        code: row.get(offset + 2)?,
        credits: row.get(offset + 3)?,
        created_at: from_millis(created_at),
        updated_at: from_millis(updated_at),
    })
}

pub(crate) fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

/// SQLite repository for course rows
pub struct CourseRepo;

impl CourseRepo {
    /// Allocate the id for a course about to be created
    pub fn new_course_id() -> String {
        uuid::Uuid::now_v7().to_string()
    }

    /// Insert a course row; returns the number of rows written
    pub fn insert_course_tx(tx: &Transaction<'_>, course: &Course) -> Result<usize> {
        tx.execute(
            "INSERT INTO courses (id, title, code, credits, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                course.id,
                course.title,
                course.code,
                course.credits,
                course.created_at.timestamp_millis(),
                course.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)
    }

    /// Overwrite the scalar fields of an existing course
    ///
    /// Returns the number of rows affected; 0 means no course has `id`.
    pub fn update_course_tx(
        tx: &Transaction<'_>,
        id: &str,
        data: &CourseCreateData,
    ) -> Result<usize> {
        tx.execute(
            "UPDATE courses SET title = ?1, code = ?2, credits = ?3, updated_at = ?4
             WHERE id = ?5",
            rusqlite::params![
                data.title,
                data.code,
                data.credits,
                now_millis().timestamp_millis(),
                id,
            ],
        )
        .map_err(from_rusqlite)
    }

    /// Delete a course row; returns the number of rows removed
    ///
    /// Edges must already be gone (see `prerequisite_sync::purge_edges`),
    /// otherwise the foreign keys reject the delete.
    pub fn delete_course_tx(tx: &Transaction<'_>, id: &str) -> Result<usize> {
        tx.execute("DELETE FROM courses WHERE id = ?1", [id])
            .map_err(from_rusqlite)
    }

    /// Get a course row by id
    pub fn get_course(conn: &Connection, id: &str) -> Result<Option<Course>> {
        conn.query_row(
            &format!("SELECT {} FROM courses c WHERE c.id = ?1", COURSE_COLUMNS),
            [id],
            |row| row_to_course(row, 0),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn course_exists(conn: &Connection, id: &str) -> Result<bool> {
        conn.query_row("SELECT 1 FROM courses WHERE id = ?1", [id], |_| Ok(()))
            .optional()
            .map(|found| found.is_some())
            .map_err(from_rusqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, migrations};

    fn setup_test_db() -> Connection {
        let mut conn = db::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
        conn
    }

    fn course(title: &str, code: &str) -> Course {
        Course::new(
            CourseRepo::new_course_id(),
            title.to_string(),
            code.to_string(),
            3,
        )
    }

    #[test]
    fn test_insert_and_get_course() {
        let mut conn = setup_test_db();
        let course = course("Discrete Mathematics", "MAT-210");

        let tx = conn.transaction().unwrap();
        assert_eq!(CourseRepo::insert_course_tx(&tx, &course).unwrap(), 1);
        tx.commit().unwrap();

        let retrieved = CourseRepo::get_course(&conn, &course.id)
            .unwrap()
            .expect("course should exist");
        assert_eq!(retrieved, course);
        assert!(CourseRepo::course_exists(&conn, &course.id).unwrap());
    }

    #[test]
    fn test_update_missing_course_affects_nothing() {
        let mut conn = setup_test_db();
        let tx = conn.transaction().unwrap();
        let affected = CourseRepo::update_course_tx(
            &tx,
            "no-such-course",
            &CourseCreateData::new("X", "Y", 1),
        )
        .unwrap();
        assert_eq!(affected, 0);
    }

    #[test]
    fn test_uncommitted_insert_is_rolled_back() {
        let mut conn = setup_test_db();
        let course = course("Compilers", "CSE-420");
        {
            let tx = conn.transaction().unwrap();
            CourseRepo::insert_course_tx(&tx, &course).unwrap();
        }
        assert!(CourseRepo::get_course(&conn, &course.id).unwrap().is_none());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(CourseRepo::new_course_id(), CourseRepo::new_course_id());
    }
}
