/*!
 * Timecode diagnostics for parsed subtitle tracks.
 *
 * The parser accepts cues whose end precedes their start, and the merge
 * engine silently ignores them. This module reports such cues, plus
 * zero-length cues and same-track overlaps, so callers can warn users
 * before merging. Nothing here ever fails.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::subtitle::{SubtitleEntry, SubtitleTrack};
use crate::timestamp::Timestamp;

/// Result of timecode validation for a single entry
#[derive(Debug, Clone)]
pub struct TimecodeEntryResult {
    /// Position of the entry in the track (1-based)
    pub position: usize,
    /// Number as written in the source file
    pub number: usize,
    /// Whether the entry will take part in a merge unchanged
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// End time is before start time; the merge engine ignores the cue
    InvalidTimeRange {
        from: Timestamp,
        to: Timestamp,
    },
    /// Start and end are equal; the cue is never shown
    ZeroDuration {
        at: Timestamp,
    },
    /// Starts while an earlier entry of the same track is still showing.
    /// `other_position` is the entry that stays on screen the longest.
    OverlapsWithEntry {
        other_position: usize,
        overlap_ms: u64,
    },
    /// Nothing of the track is on screen for too long before this entry
    LargeGap {
        prev_position: usize,
        gap_ms: u64,
    },
}

impl TimecodeIssue {
    /// Whether the merge output will differ from what the author intended
    pub fn is_blocking(&self) -> bool {
        matches!(self, TimecodeIssue::InvalidTimeRange { .. } | TimecodeIssue::ZeroDuration { .. })
    }
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { from, to } => {
                write!(f, "Invalid time range: start {} > end {}", from, to)
            }
            TimecodeIssue::ZeroDuration { at } => {
                write!(f, "Zero duration at {}", at)
            }
            TimecodeIssue::OverlapsWithEntry { other_position, overlap_ms } => {
                write!(f, "Overlaps with entry {} by {}ms", other_position, overlap_ms)
            }
            TimecodeIssue::LargeGap { prev_position, gap_ms } => {
                write!(f, "Large gap of {}ms after entry {}", gap_ms, prev_position)
            }
        }
    }
}

/// Result of validating all timecodes in a track
#[derive(Debug, Clone)]
pub struct TimecodeValidationResult {
    /// True when no entry has a blocking issue
    pub passed: bool,
    /// Results for each entry, in track order
    pub entry_results: Vec<TimecodeEntryResult>,
    /// Total number of issues
    pub total_issues: usize,
    /// Number of overlapping entry pairs
    pub overlap_count: usize,
}

impl TimecodeValidationResult {
    /// Entries with at least one issue of any kind
    pub fn entries_with_issues(&self) -> Vec<&TimecodeEntryResult> {
        self.entry_results.iter().filter(|r| !r.issues.is_empty()).collect()
    }

    /// Entries the merge engine will ignore
    pub fn failed_entries(&self) -> Vec<&TimecodeEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Configuration for timecode validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimecodeValidatorConfig {
    /// Whether to check for same-track overlaps
    #[serde(default = "default_check_overlaps")]
    pub check_overlaps: bool,
    /// Maximum gap in ms before reporting (0 = disable)
    #[serde(default)]
    pub max_gap_warning_ms: u64,
}

fn default_check_overlaps() -> bool {
    true
}

impl Default for TimecodeValidatorConfig {
    fn default() -> Self {
        Self {
            check_overlaps: default_check_overlaps(),
            max_gap_warning_ms: 0, // Disabled by default
        }
    }
}

/// Timecode validator for subtitle tracks
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self {
            config: TimecodeValidatorConfig::default(),
        }
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a single subtitle entry on its own
    pub fn validate_entry(&self, position: usize, entry: &SubtitleEntry) -> TimecodeEntryResult {
        let mut issues = Vec::new();

        if entry.to < entry.from {
            issues.push(TimecodeIssue::InvalidTimeRange {
                from: entry.from,
                to: entry.to,
            });
        } else if entry.to == entry.from {
            issues.push(TimecodeIssue::ZeroDuration { at: entry.from });
        }

        TimecodeEntryResult {
            position,
            number: entry.number,
            passed: issues.is_empty(),
            issues,
        }
    }

    /// Validate every entry of a track, including relations between entries
    pub fn validate_track(&self, track: &SubtitleTrack) -> TimecodeValidationResult {
        let entries = &track.entries;

        let mut entry_results: Vec<TimecodeEntryResult> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| self.validate_entry(i + 1, e))
            .collect();

        let mut overlap_count = 0;

        // Only well-formed cues can overlap or leave gaps
        let mut sorted: Vec<usize> = (0..entries.len())
            .filter(|&i| entries[i].is_well_formed())
            .collect();
        sorted.sort_by_key(|&i| (entries[i].from, i));

        // Latest end seen so far and the entry that owns it; a long cue stays
        // on screen across the shorter cues it contains
        let mut covering: Option<(usize, Timestamp)> = None;

        for &next_idx in &sorted {
            let next = &entries[next_idx];

            if let Some((owner_idx, max_end)) = covering {
                if self.config.check_overlaps && max_end > next.from {
                    overlap_count += 1;
                    // Overlaps are legal in SubRip; reported but not failing
                    entry_results[next_idx].issues.push(TimecodeIssue::OverlapsWithEntry {
                        other_position: owner_idx + 1,
                        overlap_ms: max_end.min(next.to).saturating_since(next.from),
                    });
                }

                if self.config.max_gap_warning_ms > 0 && next.from > max_end {
                    let gap_ms = next.from.saturating_since(max_end);
                    if gap_ms > self.config.max_gap_warning_ms {
                        entry_results[next_idx].issues.push(TimecodeIssue::LargeGap {
                            prev_position: owner_idx + 1,
                            gap_ms,
                        });
                    }
                }
            }

            if covering.is_none_or(|(_, max_end)| next.to > max_end) {
                covering = Some((next_idx, next.to));
            }
        }

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        let passed = entry_results.iter().all(|r| r.passed);

        debug!(
            "Timecode validation: {} entries, {} issues, {} overlaps",
            entries.len(),
            total_issues,
            overlap_count
        );

        TimecodeValidationResult {
            passed,
            entry_results,
            total_issues,
            overlap_count,
        }
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
