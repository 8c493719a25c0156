/*!
 * Tests for error types and conversions
 */

use dualsub::errors::{AppError, FormatError, MalformedReason};

#[test]
fn test_formatError_malformed_shouldDisplayPosition() {
    let error = FormatError::Malformed {
        block: 2,
        line: 6,
        reason: MalformedReason::InvalidTiming("00:00:02.000 --> 00:00:03,000".to_string()),
    };
    let display = format!("{}", error);

    assert!(display.contains("block 2"));
    assert!(display.contains("line 6"));
    assert!(display.contains("00:00:02.000"));
}

#[test]
fn test_malformedReason_display_shouldDescribeEachCase() {
    assert_eq!(MalformedReason::InvalidIndex("x".to_string()).to_string(), "invalid entry number 'x'");
    assert_eq!(
        MalformedReason::InvalidTiming("1 -> 2".to_string()).to_string(),
        "invalid timing line '1 -> 2'"
    );
    assert_eq!(MalformedReason::MissingTiming.to_string(), "missing timing line");
}

#[test]
fn test_malformedReason_asStdError_shouldHaveNoSource() {
    let reason: Box<dyn std::error::Error> = Box::new(MalformedReason::MissingTiming);

    assert!(reason.source().is_none());
    assert_eq!(reason.to_string(), "missing timing line");
}

#[test]
fn test_formatError_accessors_shouldReturnFields() {
    let error = FormatError::Malformed {
        block: 3,
        line: 10,
        reason: MalformedReason::MissingTiming,
    };

    assert_eq!(error.block(), 3);
    assert_eq!(error.line(), 10);
    assert_eq!(error.reason(), &MalformedReason::MissingTiming);
}

#[test]
fn test_appError_fromFormatError_shouldWrapCorrectly() {
    let error = FormatError::Malformed {
        block: 1,
        line: 1,
        reason: MalformedReason::InvalidIndex("abc".to_string()),
    };
    let app_error: AppError = error.clone().into();

    assert!(matches!(&app_error, AppError::Format(inner) if *inner == error));
    assert!(app_error.to_string().starts_with("Subtitle format error"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(ref msg) if msg.contains("gone")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("boom").into();

    assert_eq!(app_error.to_string(), "Unknown error: boom");
}
