use std::error::Error as _;
use std::io;

use gnome_ext::error::{Error, Stage};

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ValidationError("Name is required".to_string());
    assert_eq!(err.to_string(), "Validation error: Name is required.");

    let err = Error::TemplateNotFoundError {
        variant: "widget".to_string(),
        searched_path: "/usr/share/gnome-ext/templates/widget".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Template 'widget' not found at '/usr/share/gnome-ext/templates/widget'."
    );
}

#[test]
fn test_fs_helper_keeps_path_and_cause() {
    let err = Error::fs("/tmp/out/package.json")(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "denied",
    ));

    match &err {
        Error::FilesystemError { path, source } => {
            assert_eq!(path, "/tmp/out/package.json");
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("Expected FilesystemError, got {other:?}"),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_stage_tag() {
    let err = Error::ValidationError("Name is required".to_string()).during(Stage::Derive);
    assert_eq!(err.to_string(), "derive failed: Validation error: Name is required.");
    assert!(matches!(err.root(), Error::ValidationError(_)));

    let retagged = err.during(Stage::Materialize);
    assert!(matches!(retagged, Error::StageError { stage: Stage::Derive, .. }));
}
