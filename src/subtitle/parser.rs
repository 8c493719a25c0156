/*!
 * SubRip parser.
 *
 * Splits the input into blank-line separated blocks and turns each block into
 * a `SubtitleEntry`. Any malformed block fails the whole parse; there is no
 * best-effort mode.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{FormatError, MalformedReason};
use crate::subtitle::model::{LineSource, SubtitleEntry, SubtitleLine, SubtitleTrack};
use crate::timestamp::Timestamp;

// @const: SRT timing line, both sides validated by Timestamp::from_str
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+) --> (\S+)$").expect("timing pattern is valid")
});

const UTF8_BOM: char = '\u{feff}';

/// One block of consecutive non-blank lines, with 1-based line numbers
struct RawBlock<'a> {
    ordinal: usize,
    lines: Vec<(usize, &'a str)>,
}

/// Parse SubRip text, tagging every line as `LineSource::Upper`
pub fn parse(raw: &str) -> Result<SubtitleTrack, FormatError> {
    parse_with_source(raw, LineSource::Upper)
}

/// Parse SubRip text, tagging every line with `source`.
///
/// Accepts `\n` and `\r\n` line endings and ignores a leading byte order mark.
pub fn parse_with_source(raw: &str, source: LineSource) -> Result<SubtitleTrack, FormatError> {
    let content = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);

    let entries = split_blocks(content)
        .iter()
        .map(|block| parse_block(block, source))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} subtitle entries", entries.len());

    Ok(SubtitleTrack::new(entries))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn split_blocks(content: &str) -> Vec<RawBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Vec<(usize, &str)> = Vec::new();

    // str::lines treats both "\n" and "\r\n" as a terminator
    for (idx, line) in content.lines().enumerate() {
        if is_blank(line) {
            if !current.is_empty() {
                blocks.push(RawBlock {
                    ordinal: blocks.len() + 1,
                    lines: std::mem::take(&mut current),
                });
            }
            continue;
        }
        current.push((idx + 1, line));
    }

    if !current.is_empty() {
        blocks.push(RawBlock {
            ordinal: blocks.len() + 1,
            lines: current,
        });
    }

    blocks
}

fn malformed(block: &RawBlock<'_>, line: usize, reason: MalformedReason) -> FormatError {
    FormatError::Malformed {
        block: block.ordinal,
        line,
        reason,
    }
}

fn parse_block(block: &RawBlock<'_>, source: LineSource) -> Result<SubtitleEntry, FormatError> {
    // split_blocks never yields an empty block
    let (number_line_no, number_line) = block.lines[0];
    let number = parse_number(number_line)
        .ok_or_else(|| malformed(block, number_line_no, MalformedReason::InvalidIndex(number_line.trim().to_string())))?;

    let Some(&(timing_line_no, timing_line)) = block.lines.get(1) else {
        return Err(malformed(block, number_line_no + 1, MalformedReason::MissingTiming));
    };
    let (from, to) = parse_timing(timing_line)
        .ok_or_else(|| malformed(block, timing_line_no, MalformedReason::InvalidTiming(timing_line.trim().to_string())))?;

    let lines = block.lines[2..]
        .iter()
        .map(|(_, text)| SubtitleLine::new(*text, source))
        .collect();

    Ok(SubtitleEntry::new(number, from, to, lines))
}

/// Decimal digits only; `str::parse` alone would also accept a leading '+'
fn parse_number(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_timing(line: &str) -> Option<(Timestamp, Timestamp)> {
    let caps = TIMING_REGEX.captures(line.trim())?;
    let from = caps[1].parse::<Timestamp>().ok()?;
    let to = caps[2].parse::<Timestamp>().ok()?;
    Some((from, to))
}
