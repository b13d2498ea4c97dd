//! Course command handlers with boundary logging.
//!
//! - `insert_into_db`: create a course and its prerequisite edges
//! - `update_one_in_db`: overwrite fields, replace the edge set
//! - `delete_from_db`: remove a course and every edge touching it
//! - `get_all_from_db` / `get_data_by_id`: expanded reads
//!
//! ## Logging Ownership
//!
//! This layer emits `log_op_start!` / `log_op_end!` / `log_op_error!` for
//! each operation. Store and core only use `tracing::debug!()`.

#![allow(clippy::result_large_err)]

use catalog_core::errors::{CatalogError, ExError, ExErrorKind};
use catalog_core::pagination::calculate_pagination;
use catalog_core::rules::validate_course_payload;
use catalog_core::{
    log_op_end, log_op_error, log_op_start, Course, CourseCreateData, CourseDetail,
    CourseFilterRequest, GenericResponse, PaginationOptions,
};
use catalog_core_types::RequestContext;
use catalog_store::errors::{from_rusqlite, Result};
use catalog_store::repo::{course_query, prerequisite_sync, CourseRepo};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

const OP_INSERT: &str = "course_insert";
const OP_UPDATE: &str = "course_update";
const OP_DELETE: &str = "course_delete";
const OP_LIST: &str = "course_list";
const OP_GET: &str = "course_get";

/// Tag an error leaving an operation with its op (unless a lower layer
/// already named one) and the request id
fn at_boundary(err: ExError, op: &str, ctx: &RequestContext) -> ExError {
    let err = if err.op().is_none() { err.with_op(op) } else { err };
    err.with_request_id(ctx.request_id.clone())
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

fn begin_write(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)
}

/// Create a course together with its prerequisite edges
///
/// The course row and every edge are written in one transaction, edges in
/// payload order. The returned value is re-read after commit.
///
/// # Errors
///
/// - `InvalidInput`: blank title/code or zero credits
/// - `InvalidPrerequisite` / `DuplicatePrerequisite`: payload rules
/// - `ConstraintViolation`: a prerequisite id names no course; nothing is kept
/// - `CreationFailed`: the row was not written or cannot be read back
pub fn insert_into_db(
    ctx: &RequestContext,
    conn: &mut Connection,
    data: &CourseCreateData,
) -> Result<CourseDetail> {
    log_op_start!(OP_INSERT, ctx = ctx, edge_count = data.pre_requisite_courses.len());
    let start = Instant::now();

    let result = insert_into_db_impl(conn, data).map_err(|e| {
        let e = at_boundary(e, OP_INSERT, ctx);
        log_op_error!(OP_INSERT, ctx = ctx, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(OP_INSERT, ctx = ctx, duration_ms = elapsed_ms(start), course_id = result.id());

    Ok(result)
}

fn insert_into_db_impl(conn: &mut Connection, data: &CourseCreateData) -> Result<CourseDetail> {
    let course_id = CourseRepo::new_course_id();
    validate_course_payload(&course_id, data)
        .map_err(|e| ExError::from(e).with_entity_id(&course_id))?;

    let course = Course::new(
        course_id.clone(),
        data.title.clone(),
        data.code.clone(),
        data.credits,
    );

    let tx = begin_write(conn)?;
    if CourseRepo::insert_course_tx(&tx, &course)? == 0 {
        return Err(ExError::new(ExErrorKind::CreationFailed)
            .with_entity_id(&course_id)
            .with_message("course row was not written"));
    }
    prerequisite_sync::create_edges(&tx, &course_id, &data.pre_requisite_courses)?;
    tx.commit().map_err(from_rusqlite)?;

    course_query::find_course_detail(conn, &course_id)?.ok_or_else(|| {
        ExError::new(ExErrorKind::CreationFailed)
            .with_entity_id(&course_id)
            .with_message("created course could not be read back")
    })
}

/// Overwrite a course and replace its prerequisite edges
///
/// Edges where the course is the dependent are deleted and recreated from
/// the payload, so after success they match the payload exactly. Edges where
/// the course is somebody else's prerequisite are untouched.
///
/// # Errors
///
/// - `InvalidPrerequisite`: the payload lists `id` itself, or a blank id
/// - `DuplicatePrerequisite`: an id is listed twice
/// - `UpdateFailed`: no course has `id`, or it cannot be read back
/// - `ConstraintViolation`: a prerequisite id names no course; nothing changes
pub fn update_one_in_db(
    ctx: &RequestContext,
    conn: &mut Connection,
    id: &str,
    data: &CourseCreateData,
) -> Result<CourseDetail> {
    log_op_start!(
        OP_UPDATE,
        ctx = ctx,
        course_id = id,
        edge_count = data.pre_requisite_courses.len()
    );
    let start = Instant::now();

    let result = update_one_in_db_impl(conn, id, data).map_err(|e| {
        let e = at_boundary(e, OP_UPDATE, ctx);
        log_op_error!(
            OP_UPDATE,
            ctx = ctx,
            e.clone(),
            duration_ms = elapsed_ms(start),
            course_id = id
        );
        e
    })?;

    log_op_end!(OP_UPDATE, ctx = ctx, duration_ms = elapsed_ms(start), course_id = id);

    Ok(result)
}

fn update_one_in_db_impl(
    conn: &mut Connection,
    id: &str,
    data: &CourseCreateData,
) -> Result<CourseDetail> {
    validate_course_payload(id, data).map_err(|e| ExError::from(e).with_entity_id(id))?;

    let tx = begin_write(conn)?;
    if CourseRepo::update_course_tx(&tx, id, data)? == 0 {
        return Err(ExError::new(ExErrorKind::UpdateFailed)
            .with_entity_id(id)
            .with_message("no course with this id"));
    }
    prerequisite_sync::replace_edges(&tx, id, &data.pre_requisite_courses)?;
    tx.commit().map_err(from_rusqlite)?;

    course_query::find_course_detail(conn, id)?.ok_or_else(|| {
        ExError::new(ExErrorKind::UpdateFailed)
            .with_entity_id(id)
            .with_message("updated course could not be read back")
    })
}

/// Delete a course and every edge that references it
///
/// Edges in both directions and the course row go in one transaction.
/// Returns the course row as it was before deletion.
///
/// # Errors
///
/// - `NotFound`: no course has `id`
/// - `Persistence`: the store failed; nothing is deleted
pub fn delete_from_db(ctx: &RequestContext, conn: &mut Connection, id: &str) -> Result<Course> {
    log_op_start!(OP_DELETE, ctx = ctx, course_id = id);
    let start = Instant::now();

    let result = delete_from_db_impl(conn, id).map_err(|e| {
        let e = at_boundary(e, OP_DELETE, ctx);
        log_op_error!(
            OP_DELETE,
            ctx = ctx,
            e.clone(),
            duration_ms = elapsed_ms(start),
            course_id = id
        );
        e
    })?;

    log_op_end!(OP_DELETE, ctx = ctx, duration_ms = elapsed_ms(start), course_id = id);

    Ok(result)
}

fn delete_from_db_impl(conn: &mut Connection, id: &str) -> Result<Course> {
    let tx = begin_write(conn)?;

    let course = CourseRepo::get_course(&tx, id)?.ok_or_else(|| not_found(id))?;
    prerequisite_sync::purge_edges(&tx, id)?;
    if CourseRepo::delete_course_tx(&tx, id)? == 0 {
        return Err(not_found(id));
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(course)
}

/// Filtered, sorted, paginated list of expanded courses
///
/// `meta.total` counts every match of the filters, independent of the page.
///
/// # Errors
///
/// `InvalidInput` for unknown filter/sort fields or a zero page/limit.
pub fn get_all_from_db(
    ctx: &RequestContext,
    conn: &Connection,
    filters: &CourseFilterRequest,
    options: &PaginationOptions,
) -> Result<GenericResponse<CourseDetail>> {
    log_op_start!(OP_LIST, ctx = ctx);
    let start = Instant::now();

    let result = get_all_from_db_impl(conn, filters, options).map_err(|e| {
        let e = at_boundary(e, OP_LIST, ctx);
        log_op_error!(OP_LIST, ctx = ctx, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(OP_LIST, ctx = ctx, duration_ms = elapsed_ms(start), total = result.meta.total);

    Ok(result)
}

fn get_all_from_db_impl(
    conn: &Connection,
    filters: &CourseFilterRequest,
    options: &PaginationOptions,
) -> Result<GenericResponse<CourseDetail>> {
    let pagination = calculate_pagination(options).map_err(ExError::from)?;
    course_query::find_course_details(conn, filters, &pagination)
}

/// Expanded course by id
///
/// Absence is `Ok(None)`; use [`require_found`] where a missing course
/// should become `NotFound`.
pub fn get_data_by_id(
    ctx: &RequestContext,
    conn: &Connection,
    id: &str,
) -> Result<Option<CourseDetail>> {
    log_op_start!(OP_GET, ctx = ctx, course_id = id);
    let start = Instant::now();

    let result = course_query::find_course_detail(conn, id).map_err(|e| {
        let e = at_boundary(e, OP_GET, ctx);
        log_op_error!(
            OP_GET,
            ctx = ctx,
            e.clone(),
            duration_ms = elapsed_ms(start),
            course_id = id
        );
        e
    })?;

    log_op_end!(
        OP_GET,
        ctx = ctx,
        duration_ms = elapsed_ms(start),
        course_id = id,
        found = result.is_some()
    );

    Ok(result)
}

/// Turn an absent lookup result into `NotFound` for `id`
pub fn require_found<T>(value: Option<T>, id: &str) -> Result<T> {
    value.ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> ExError {
    CatalogError::CourseNotFound {
        course_id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_boundary_keeps_lower_layer_op() {
        let ctx = RequestContext::new();
        let err = at_boundary(
            ExError::new(ExErrorKind::ConstraintViolation).with_op("create_edges"),
            OP_INSERT,
            &ctx,
        );
        assert_eq!(err.op(), Some("create_edges"));
        assert_eq!(err.request_id(), Some(&ctx.request_id));
    }

    #[test]
    fn test_at_boundary_fills_missing_op() {
        let ctx = RequestContext::new();
        let err = at_boundary(ExError::new(ExErrorKind::NotFound), OP_GET, &ctx);
        assert_eq!(err.op(), Some(OP_GET));
    }

    #[test]
    fn test_require_found() {
        assert_eq!(require_found(Some(7), "c1").unwrap(), 7);

        let err = require_found::<u32>(None, "c1").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("c1"));
        assert_eq!(err.http_status(), 404);
    }
}
