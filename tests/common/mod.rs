/*!
 * Common test utilities for the dualsub test suite
 */

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use dualsub::subtitle::{LineSource, SubtitleEntry, SubtitleTrack};
use dualsub::timestamp::Timestamp;

/// Three English cues with a gap between each
pub const UPPER_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// French cues overlapping the English ones at different boundaries
pub const LOWER_SRT: &str = "1
00:00:02,000 --> 00:00:04,000
Ceci est un sous-titre de test.

2
00:00:05,000 --> 00:00:12,000
Il contient plusieurs entrées.
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample English subtitle file
pub fn create_upper_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, UPPER_SRT)
}

/// Creates a sample French subtitle file
pub fn create_lower_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, LOWER_SRT)
}

/// Builds a track from `(from_ms, to_ms, text)` triples, one text line per cue
pub fn track(cues: &[(u64, u64, &str)], source: LineSource) -> SubtitleTrack {
    SubtitleTrack::new(
        cues.iter()
            .enumerate()
            .map(|(i, (from, to, text))| {
                SubtitleEntry::from_texts(i + 1, Timestamp::from_millis(*from), Timestamp::from_millis(*to), &[*text], source)
            })
            .collect(),
    )
}

/// `(from_ms, to_ms, texts)` view of a track for compact assertions
pub fn summarize(track: &SubtitleTrack) -> Vec<(u64, u64, Vec<String>)> {
    track
        .entries
        .iter()
        .map(|e| (e.from.as_millis(), e.to.as_millis(), e.texts().map(str::to_string).collect()))
        .collect()
}
