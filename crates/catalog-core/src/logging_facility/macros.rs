//! Canonical logging macros
//!
//! Command handlers pass their `RequestContext` as `ctx = ...` right after
//! the op name. Events then carry `request_id` (and `actor` on start) without
//! each call site spelling them out.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use catalog_core::log_op_start;
/// # use catalog_core::catalog_core_types::RequestContext;
/// let ctx = RequestContext::new().with_actor("registrar");
/// log_op_start!("course_list");
/// log_op_start!("course_update", ctx = ctx, course_id = "c123");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, ctx = $ctx:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_START,
            request_id = $ctx.request_id.as_str(),
            actor = $ctx.actor.as_deref(),
        );
    };
    ($op:expr, ctx = $ctx:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_START,
            request_id = $ctx.request_id.as_str(),
            actor = $ctx.actor.as_deref(),
            $($field)*
        );
    };
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use catalog_core::log_op_end;
/// # use catalog_core::catalog_core_types::RequestContext;
/// let ctx = RequestContext::new();
/// log_op_end!("course_insert", duration_ms = 42);
/// log_op_end!("course_list", ctx = ctx, duration_ms = 7, total = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, ctx = $ctx:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END,
            duration_ms = $duration,
            request_id = $ctx.request_id.as_str(),
        );
    };
    ($op:expr, ctx = $ctx:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END,
            duration_ms = $duration,
            request_id = $ctx.request_id.as_str(),
            $($field)*
        );
    };
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`. Besides its kind and code,
/// the event carries the course and prerequisite ids the error names, so a
/// rejected edge can be traced without parsing the message.
///
/// # Example
///
/// ```
/// # use catalog_core::{log_op_error, errors::CatalogError};
/// # use catalog_core::catalog_core_types::RequestContext;
/// let ctx = RequestContext::new();
/// let err = CatalogError::CourseNotFound { course_id: "c1".to_string() };
/// log_op_error!("course_get", ctx = ctx, err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, ctx = $ctx:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            request_id = $ctx.request_id.as_str(),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.course_id = ex_err.entity_id(),
            err.pre_requisite_id = ex_err.related_id(),
        );
    }};
    ($op:expr, ctx = $ctx:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            request_id = $ctx.request_id.as_str(),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.course_id = ex_err.entity_id(),
            err.pre_requisite_id = ex_err.related_id(),
            $($field)*
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.course_id = ex_err.entity_id(),
            err.pre_requisite_id = ex_err.related_id(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::catalog_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.course_id = ex_err.entity_id(),
            err.pre_requisite_id = ex_err.related_id(),
            $($field)*
        );
    }};
}
