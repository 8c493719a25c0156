/*!
 * SubRip serializer.
 *
 * Inverse of the parser for every track the parser can produce. Entries are
 * renumbered 1..N by position; the parsed numbers are never written back.
 */

use serde::{Deserialize, Serialize};

use crate::subtitle::model::{SubtitleEntry, SubtitleTrack};

/// Line terminator written by the serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, for players that insist on it
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Serialize a track with `\n` line endings
pub fn serialize(track: &SubtitleTrack) -> String {
    serialize_with(track, LineEnding::Lf)
}

/// Serialize a track using the given line ending.
///
/// Every line is terminated, entries are separated by exactly one blank line,
/// and an empty track produces an empty string.
pub fn serialize_with(track: &SubtitleTrack, line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut out = String::new();

    for (idx, entry) in track.entries.iter().enumerate() {
        if idx > 0 {
            out.push_str(eol);
        }
        write_entry(&mut out, idx + 1, entry, eol);
    }

    out
}

fn write_entry(out: &mut String, number: usize, entry: &SubtitleEntry, eol: &str) {
    out.push_str(&number.to_string());
    out.push_str(eol);
    out.push_str(&format!("{} --> {}", entry.from, entry.to));
    out.push_str(eol);
    for line in &entry.lines {
        out.push_str(&line.text);
        out.push_str(eol);
    }
}
