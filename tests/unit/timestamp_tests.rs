/*!
 * Tests for timestamp parsing and formatting
 */

use dualsub::timestamp::{Timestamp, TimestampParseError};

/// Test that a canonical timestamp parses to the right millisecond value
#[test]
fn test_parse_withCanonicalTimestamp_shouldReturnMilliseconds() {
    let ts: Timestamp = "01:02:03,456".parse().unwrap();

    assert_eq!(ts.as_millis(), 3_723_456);
    assert_eq!(ts, Timestamp::from_hms(1, 2, 3, 456));
}

/// Test the components of a timestamp
#[test]
fn test_components_shouldSplitClockFields() {
    let ts = Timestamp::from_millis(3_723_456);

    assert_eq!(ts.hours(), 1);
    assert_eq!(ts.minutes(), 2);
    assert_eq!(ts.seconds(), 3);
    assert_eq!(ts.millis(), 456);
}

/// Test zero padding of the canonical form
#[test]
fn test_display_withSmallValues_shouldZeroPad() {
    assert_eq!(Timestamp::ZERO.to_string(), "00:00:00,000");
    assert_eq!(Timestamp::from_millis(1_005).to_string(), "00:00:01,005");
}

/// Test that hours past 99 widen instead of wrapping
#[test]
fn test_display_withHundredHours_shouldUseThreeDigits() {
    let ts = Timestamp::from_hms(100, 0, 0, 0);

    assert_eq!(ts.to_string(), "100:00:00,000");
    assert_eq!("100:00:00,000".parse::<Timestamp>().unwrap(), ts);
}

/// Test that non-canonical forms are rejected
#[test]
fn test_parse_withNonCanonicalForms_shouldFail() {
    for input in [
        "00:00:02.000",
        "0:00:02,000",
        "00:0:02,000",
        "00:00:02,00",
        "00:00:02,0000",
        "00:60:00,000",
        "00:00:60,000",
        " 00:00:02,000",
        "",
    ] {
        assert!(input.parse::<Timestamp>().is_err(), "{:?} should not parse", input);
    }
}

/// Test that the parse error carries the offending text
#[test]
fn test_parseError_shouldIncludeInput() {
    let err = "12:34".parse::<Timestamp>().unwrap_err();

    assert_eq!(err, TimestampParseError("12:34".to_string()));
    assert!(err.to_string().contains("12:34"));
}

/// Test total ordering by millisecond value
#[test]
fn test_ordering_shouldFollowMilliseconds() {
    let mut stamps = vec![
        Timestamp::from_millis(3_000),
        Timestamp::ZERO,
        Timestamp::from_hms(0, 0, 1, 500),
    ];
    stamps.sort();

    assert_eq!(stamps, vec![Timestamp::ZERO, Timestamp::from_millis(1_500), Timestamp::from_millis(3_000)]);
}

/// Test the saturating difference helper
#[test]
fn test_saturatingSince_withLaterEarlier_shouldReturnZero() {
    let a = Timestamp::from_millis(1_000);
    let b = Timestamp::from_millis(2_500);

    assert_eq!(b.saturating_since(a), 1_500);
    assert_eq!(a.saturating_since(b), 0);
}

/// Test that timestamps serialize as plain milliseconds in JSON
#[test]
fn test_serde_shouldUsePlainMilliseconds() {
    let json = serde_json::to_string(&Timestamp::from_millis(42)).unwrap();
    assert_eq!(json, "42");

    let back: Timestamp = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Timestamp::from_millis(42));
}
