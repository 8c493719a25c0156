/*!
 * Tests for the SubRip serializer
 */

use dualsub::subtitle::{parse, serialize, serialize_with, LineEnding, LineSource, SubtitleEntry, SubtitleTrack};
use dualsub::timestamp::Timestamp;
use crate::common;

/// Test the exact layout of serialized output
#[test]
fn test_serialize_withTwoEntries_shouldSeparateWithOneBlankLine() {
    let track = common::track(&[(1_000, 2_000, "Hello"), (3_000, 4_500, "World")], LineSource::Upper);

    let output = serialize(&track);

    assert_eq!(
        output,
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,500\nWorld\n"
    );
}

/// Test that an empty track serializes to nothing
#[test]
fn test_serialize_withEmptyTrack_shouldReturnEmptyString() {
    assert_eq!(serialize(&SubtitleTrack::empty()), "");
}

/// Test that numbers are rewritten densely by position
#[test]
fn test_serialize_withSparseNumbers_shouldRenumber() {
    let track = SubtitleTrack::new(vec![
        SubtitleEntry::from_texts(10, Timestamp::from_millis(0), Timestamp::from_millis(1_000), &["a"], LineSource::Upper),
        SubtitleEntry::from_texts(4, Timestamp::from_millis(1_000), Timestamp::from_millis(2_000), &["b"], LineSource::Upper),
    ]);

    let output = serialize(&track);

    assert!(output.starts_with("1\n"));
    assert!(output.contains("\n\n2\n"));
    assert!(!output.contains("10"));
}

/// Test CRLF output
#[test]
fn test_serializeWith_withCrLf_shouldTerminateEveryLineWithCrLf() {
    let track = common::track(&[(0, 1_000, "A"), (1_000, 2_000, "B")], LineSource::Upper);

    let output = serialize_with(&track, LineEnding::CrLf);

    assert_eq!(output, "1\r\n00:00:00,000 --> 00:00:01,000\r\nA\r\n\r\n2\r\n00:00:01,000 --> 00:00:02,000\r\nB\r\n");
    assert_eq!(output.matches('\n').count(), output.matches("\r\n").count());
}

/// Test that an entry without lines keeps its slot
#[test]
fn test_serialize_withEmptyCue_shouldWriteHeaderOnly() {
    let track = SubtitleTrack::new(vec![SubtitleEntry::new(1, Timestamp::ZERO, Timestamp::from_millis(500), vec![])]);

    assert_eq!(serialize(&track), "1\n00:00:00,000 --> 00:00:00,500\n");
}

/// Test that parse(serialize(t)) gives back t for a canonical track
#[test]
fn test_roundTrip_withCanonicalInput_shouldReproduceText() {
    let track = parse(common::UPPER_SRT).unwrap();

    let output = serialize(&track);

    assert_eq!(output, common::UPPER_SRT);
    assert_eq!(parse(&output).unwrap(), track);
}

/// Test that serializing is idempotent through a parse
#[test]
fn test_serialize_afterReparse_shouldBeStable() {
    let raw = "5\n00:00:01,000 --> 00:00:02,000\nA\n\n\n\n9\n00:00:02,000 --> 00:00:03,000\n\n";

    let once = serialize(&parse(raw).unwrap());
    let twice = serialize(&parse(&once).unwrap());

    assert_eq!(once, twice);
}

/// Test that inverted cues survive a round trip
#[test]
fn test_roundTrip_withInvertedCue_shouldKeepTimes() {
    let raw = "1\n00:00:05,000 --> 00:00:02,000\nBackwards\n";

    assert_eq!(serialize(&parse(raw).unwrap()), raw);
}
