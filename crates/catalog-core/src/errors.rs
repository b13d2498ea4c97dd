use catalog_core_types::RequestId;
use thiserror::Error;

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code and to the HTTP-equivalent status
/// the outer layer should answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Payload / query validation
    InvalidInput,
    InvalidPrerequisite,
    DuplicatePrerequisite,

    // Lookup
    NotFound,

    // Writes
    CreationFailed,
    UpdateFailed,
    ConstraintViolation,

    // Integration/IO
    Persistence,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidPrerequisite => "ERR_INVALID_PREREQUISITE",
            ExErrorKind::DuplicatePrerequisite => "ERR_DUPLICATE_PREREQUISITE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::CreationFailed => "ERR_CREATION_FAILED",
            ExErrorKind::UpdateFailed => "ERR_UPDATE_FAILED",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
        }
    }

    /// HTTP-equivalent status code for the boundary layer
    pub fn http_status(&self) -> u16 {
        match self {
            ExErrorKind::InvalidInput
            | ExErrorKind::InvalidPrerequisite
            | ExErrorKind::DuplicatePrerequisite
            | ExErrorKind::CreationFailed
            | ExErrorKind::UpdateFailed
            | ExErrorKind::ConstraintViolation => 400,
            ExErrorKind::NotFound => 404,
            ExErrorKind::Persistence | ExErrorKind::Io => 500,
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus the
/// context a caller needs to act on the failure: the operation, the course
/// it concerns and, for edge failures, the prerequisite id involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    related_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            related_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (the course the operation targets)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add the id on the other end of an edge (the offending prerequisite)
    pub fn with_related_id(mut self, id: impl Into<String>) -> Self {
        self.related_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn http_status(&self) -> u16 {
        self.kind.http_status()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn related_id(&self) -> Option<&str> {
        self.related_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (course_id: {})", entity_id)?;
        }
        if let Some(related_id) = &self.related_id {
            write!(f, " (pre_requisite_id: {})", related_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain rule failures raised by catalog-core before anything touches the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A scalar course field failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A course listed itself as a prerequisite
    #[error("Course {course_id} cannot be its own prerequisite")]
    SelfPrerequisite { course_id: String },

    /// A prerequisite request had an empty course id
    #[error("Prerequisite at position {index} has an empty course id")]
    BlankPrerequisiteId { index: usize },

    /// The same prerequisite id appeared twice in one payload
    #[error("Prerequisite {pre_requisite_id} is listed more than once")]
    DuplicatePrerequisite { pre_requisite_id: String },

    /// Course not found
    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: String },

    /// Filter on a field that is not filterable
    #[error("Unknown filter field: {field}")]
    UnknownFilterField { field: String },

    /// Sort on a field that is not sortable
    #[error("Unknown sort field: {field}")]
    UnknownSortField { field: String },

    /// Page or limit out of range
    #[error("Invalid pagination: {reason}")]
    InvalidPagination { reason: String },
}

impl From<CatalogError> for ExError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::InvalidField { .. }
            | CatalogError::UnknownFilterField { .. }
            | CatalogError::UnknownSortField { .. }
            | CatalogError::InvalidPagination { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            CatalogError::SelfPrerequisite { course_id } => {
                ExError::new(ExErrorKind::InvalidPrerequisite)
                    .with_entity_id(course_id.clone())
                    .with_related_id(course_id)
                    .with_message(message)
            }
            CatalogError::BlankPrerequisiteId { .. } => {
                ExError::new(ExErrorKind::InvalidPrerequisite).with_message(message)
            }
            CatalogError::DuplicatePrerequisite { pre_requisite_id } => {
                ExError::new(ExErrorKind::DuplicatePrerequisite)
                    .with_related_id(pre_requisite_id)
                    .with_message(message)
            }
            CatalogError::CourseNotFound { course_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(course_id)
                .with_message(message),
        }
    }
}
