use catalog_core::errors::{CatalogError, ExError, ExErrorKind};
use catalog_core_types::RequestId;

#[test]
fn test_not_found_verifiable_by_kind() {
    let err: ExError = CatalogError::CourseNotFound {
        course_id: "missing".to_string(),
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.code(), "ERR_NOT_FOUND");
    assert_eq!(err.entity_id(), Some("missing"));
    assert_eq!(err.http_status(), 404);
}

#[test]
fn test_duplicate_prerequisite_maps_to_its_own_kind() {
    let err: ExError = CatalogError::DuplicatePrerequisite {
        pre_requisite_id: "c2".to_string(),
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::DuplicatePrerequisite);
    assert_eq!(err.related_id(), Some("c2"));
    assert!(err.message().contains("more than once"));
}

#[test]
fn test_query_errors_are_invalid_input() {
    let cases = vec![
        CatalogError::UnknownFilterField {
            field: "room".to_string(),
        },
        CatalogError::UnknownSortField {
            field: "room".to_string(),
        },
        CatalogError::InvalidPagination {
            reason: "page starts at 1".to_string(),
        },
        CatalogError::InvalidField {
            field: "credits".to_string(),
            reason: "must be a positive integer".to_string(),
        },
    ];

    for case in cases {
        let err: ExError = case.into();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.http_status(), 400);
    }
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::CreationFailed, "ERR_CREATION_FAILED", 400),
        (ExErrorKind::UpdateFailed, "ERR_UPDATE_FAILED", 400),
        (ExErrorKind::ConstraintViolation, "ERR_CONSTRAINT_VIOLATION", 400),
        (ExErrorKind::InvalidPrerequisite, "ERR_INVALID_PREREQUISITE", 400),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND", 404),
        (ExErrorKind::Persistence, "ERR_PERSISTENCE", 500),
    ];

    for (kind, expected_code, expected_status) in kinds {
        assert_eq!(kind.code(), expected_code);
        assert_eq!(kind.http_status(), expected_status);
    }
}

#[test]
fn test_request_id_travels_with_error() {
    let request_id = RequestId::from_string("req-123".to_string());
    let err = ExError::new(ExErrorKind::UpdateFailed)
        .with_op("course_update")
        .with_request_id(request_id.clone());

    assert_eq!(err.request_id(), Some(&request_id));
    assert_eq!(err.op(), Some("course_update"));
}
