//! Canonical field keys and event names for structured logging

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_ACTOR: &str = "actor";

// Entity identifiers
pub const FIELD_COURSE_ID: &str = "course_id";
pub const FIELD_PRE_REQUISITE_ID: &str = "pre_requisite_id";

// Collection sizes
pub const FIELD_EDGE_COUNT: &str = "edge_count";
pub const FIELD_TOTAL: &str = "total";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_COURSE_ID: &str = "err.course_id";
pub const FIELD_ERR_PRE_REQUISITE_ID: &str = "err.pre_requisite_id";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
