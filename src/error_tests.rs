use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = GuardError::Config("unknown check 'nope'".to_string());
    assert_eq!(err.to_string(), "Configuration error: unknown check 'nope'");
}

#[test]
fn error_display_file_read() {
    let err = GuardError::FileRead {
        path: PathBuf::from("glossary.csv"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("glossary.csv"));
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(GuardError::Config("x".to_string()).error_type(), "Config");
    assert_eq!(GuardError::Usage("x".to_string()).error_type(), "Usage");
    assert_eq!(
        GuardError::FileWrite {
            path: PathBuf::from("a_fixed.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .error_type(),
        "FileWrite"
    );
}

#[test]
fn detail_includes_source_chain() {
    let err = GuardError::FileWrite {
        path: PathBuf::from("out/a_fixed.csv"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access\ndenied"),
    };
    let detail = err.detail();

    assert!(detail.starts_with("Failed to write file: out/a_fixed.csv"));
    assert!(detail.ends_with("access denied"));
    assert!(!detail.contains('\n'));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::other("boom");
    let err: GuardError = io.into();
    assert_eq!(err.error_type(), "Io");
}
