// Store-level tests against a file database opened through StoreConfig.
// Exercises schema constraints, edge synchronisation and the query layer
// without the engine on top.

use catalog_core::pagination::calculate_pagination;
use catalog_core::{Course, CourseFilterRequest, PaginationOptions, PrerequisiteCourseRequest};
use catalog_store::repo::{course_query, prerequisite_sync, CourseRepo};
use catalog_store::{db, StoreConfig};
use rusqlite::Connection;
use tempfile::TempDir;

fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig {
        db_path: temp_dir.path().join("nested").join("catalog.db"),
        ..StoreConfig::default()
    };
    let conn = db::open_with_config(&config).unwrap();
    (temp_dir, conn)
}

fn seed(conn: &mut Connection, code: &str) -> String {
    let course = Course::new(
        CourseRepo::new_course_id(),
        format!("Course {}", code),
        code.to_string(),
        3,
    );
    let tx = conn.transaction().unwrap();
    CourseRepo::insert_course_tx(&tx, &course).unwrap();
    tx.commit().unwrap();
    course.id
}

fn link(conn: &mut Connection, course_id: &str, prereqs: &[&str]) {
    let requests: Vec<_> = prereqs
        .iter()
        .map(|id| PrerequisiteCourseRequest::new(*id))
        .collect();
    let tx = conn.transaction().unwrap();
    prerequisite_sync::create_edges(&tx, course_id, &requests).unwrap();
    tx.commit().unwrap();
}

#[test]
fn test_open_with_config_creates_directory_and_schema() {
    let (temp_dir, conn) = setup_db();
    assert!(temp_dir.path().join("nested").join("catalog.db").exists());

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('courses', 'course_to_prerequisites')",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 2);

    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |r| r.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}

#[test]
fn test_foreign_keys_block_dangling_edges() {
    let (_tmp, conn) = setup_db();
    let result = conn.execute(
        "INSERT INTO course_to_prerequisites (course_id, pre_requisite_id, created_at)
         VALUES ('x', 'y', 0)",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn test_foreign_keys_block_deleting_referenced_course() {
    let (_tmp, mut conn) = setup_db();
    let b = seed(&mut conn, "B-1");
    let a = seed(&mut conn, "A-1");
    link(&mut conn, &a, &[b.as_str()]);

    let tx = conn.transaction().unwrap();
    let err = CourseRepo::delete_course_tx(&tx, &b).unwrap_err();
    assert_eq!(err.kind(), catalog_core::ExErrorKind::ConstraintViolation);
}

#[test]
fn test_detail_reads_both_directions() {
    let (_tmp, mut conn) = setup_db();
    let c = seed(&mut conn, "C-1");
    let b = seed(&mut conn, "B-1");
    let a = seed(&mut conn, "A-1");
    link(&mut conn, &b, &[c.as_str()]);
    link(&mut conn, &a, &[b.as_str()]);

    let detail = course_query::find_course_detail(&conn, &b).unwrap().unwrap();
    assert_eq!(detail.prerequisite_ids(), vec![c.as_str()]);
    assert_eq!(detail.dependent_ids(), vec![a.as_str()]);
    assert_eq!(detail.pre_requisite_for[0].course.code, "A-1");

    assert!(course_query::find_course_detail(&conn, "missing")
        .unwrap()
        .is_none());
}

#[test]
fn test_count_and_list_share_filter() {
    let (_tmp, mut conn) = setup_db();
    for code in ["ECO-101", "ECO-102", "ECO-201", "HIS-101"] {
        seed(&mut conn, code);
    }

    let filters = CourseFilterRequest::search("eco");
    let pagination = calculate_pagination(&PaginationOptions::page(1, 2)).unwrap();
    let response = course_query::find_course_details(&conn, &filters, &pagination).unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.meta.total, 3);

    let filter = course_query::CourseWhere::from_filters(&filters).unwrap();
    assert_eq!(course_query::count_courses(&conn, &filter).unwrap(), 3);
}

#[test]
fn test_prerequisite_courses_follow_insertion_order() {
    let (_tmp, mut conn) = setup_db();
    let x = seed(&mut conn, "X-1");
    let y = seed(&mut conn, "Y-1");
    let z = seed(&mut conn, "Z-1");
    let a = seed(&mut conn, "A-1");
    link(&mut conn, &a, &[z.as_str(), x.as_str(), y.as_str()]);

    let ids: Vec<String> = course_query::prerequisite_courses(&conn, &a)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![z, x, y]);
}
