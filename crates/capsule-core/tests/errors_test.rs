use capsule_core::errors::*;

#[test]
fn capsule_not_found_carries_id() {
    let err = CapsuleError::CapsuleNotFound {
        id: "abc-123".into(),
    };
    assert!(err.to_string().contains("abc-123"));
    assert_eq!(err.class(), ErrorClass::NotFound);
}

#[test]
fn not_registered_is_a_not_found_class() {
    let err = CapsuleError::NotRegistered { id: "c-9".into() };
    assert!(err.is_not_found());
    assert!(err.to_string().contains("c-9"));
}

#[test]
fn already_registered_is_its_own_class() {
    let err = CapsuleError::AlreadyRegistered { id: "dup".into() };
    assert_eq!(err.class(), ErrorClass::AlreadyExists);
}

#[test]
fn invalid_relation_kind_carries_name() {
    let err = CapsuleError::InvalidRelationKind {
        kind: "sibling".into(),
    };
    assert!(err.to_string().contains("sibling"));
    assert_eq!(err.class(), ErrorClass::InvalidInput);
}

#[test]
fn out_of_range_carries_bounds() {
    let err = CapsuleError::check_range("strength", 1.5, 0.0, 1.0).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("strength"));
    assert!(msg.contains("1.5"));
    assert_eq!(err.class(), ErrorClass::InvalidInput);
}

#[test]
fn check_range_rejects_nan_and_accepts_bounds() {
    assert!(CapsuleError::check_range("score", f64::NAN, 0.0, 100.0).is_err());
    assert!(CapsuleError::check_range("score", 0.0, 0.0, 100.0).is_ok());
    assert!(CapsuleError::check_range("score", 100.0, 0.0, 100.0).is_ok());
}

// --- From impls ---

#[test]
fn storage_error_converts_to_capsule_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let err: CapsuleError = storage_err.into();
    assert!(matches!(err, CapsuleError::StorageError(_)));
    assert_eq!(err.class(), ErrorClass::StoreFailure);
}

#[test]
fn serde_error_converts_to_store_failure() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: CapsuleError = serde_err.into();
    assert_eq!(err.class(), ErrorClass::StoreFailure);
}
