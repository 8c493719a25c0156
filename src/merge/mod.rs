/*!
 * Merge engine: combines an upper and a lower track into one.
 *
 * The timeline is cut at every cue boundary of both tracks. Each slice that
 * has something to show becomes one output cue carrying the active upper
 * lines followed by the active lower lines. Back-to-back cues with identical
 * text are then joined again.
 *
 * Merging never fails. Cues whose end does not come after their start are
 * ignored rather than reported; see `validation::timecodes` for diagnostics.
 */

pub mod coalesce;
pub mod sweep;

use log::debug;

use crate::subtitle::{LineSource, SubtitleEntry, SubtitleLine, SubtitleTrack};

pub use coalesce::{coalesce, same_rendered_text};
pub use sweep::{sweep, Interval, Sweep};

/// Counters describing one merge, for logging and summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Intervals with at least one active cue
    pub intervals: usize,
    /// Entries in the merged track
    pub emitted: usize,
    /// Entries absorbed by coalescing
    pub coalesced: usize,
    /// Upper cues ignored because `from >= to`
    pub skipped_upper: usize,
    /// Lower cues ignored because `from >= to`
    pub skipped_lower: usize,
}

/// Merge two tracks; upper lines always precede lower lines
pub fn merge(upper: &SubtitleTrack, lower: &SubtitleTrack) -> SubtitleTrack {
    merge_with_stats(upper, lower).0
}

/// Merge two tracks and report what happened
pub fn merge_with_stats(upper: &SubtitleTrack, lower: &SubtitleTrack) -> (SubtitleTrack, MergeStats) {
    let language = merged_language(upper, lower);

    // One empty side: the other track passes through untouched apart from its tags
    if upper.is_empty() || lower.is_empty() {
        let (track, source) = if lower.is_empty() {
            (upper, LineSource::Upper)
        } else {
            (lower, LineSource::Lower)
        };
        let mut merged = track.retagged(source);
        merged.language = language;

        let stats = MergeStats {
            emitted: merged.len(),
            ..MergeStats::default()
        };
        debug!("Merge pass-through: {} entries tagged {}", stats.emitted, source);
        return (merged, stats);
    }

    let timeline = sweep::sweep(&upper.entries, &lower.entries);

    let sliced: Vec<SubtitleEntry> = timeline
        .intervals
        .iter()
        .map(|interval| build_entry(interval, upper, lower))
        .collect();

    let (mut entries, coalesced) = coalesce::coalesce(sliced);
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.number = idx + 1;
    }

    let stats = MergeStats {
        intervals: timeline.intervals.len(),
        emitted: entries.len(),
        coalesced,
        skipped_upper: timeline.skipped_upper,
        skipped_lower: timeline.skipped_lower,
    };

    debug!(
        "Merged {} upper + {} lower entries: {} of {} slices active, {} emitted, {} coalesced, {} skipped",
        upper.len(),
        lower.len(),
        stats.intervals,
        timeline.slices,
        stats.emitted,
        stats.coalesced,
        stats.skipped_upper + stats.skipped_lower
    );

    let mut merged = SubtitleTrack::new(entries);
    merged.language = language;
    (merged, stats)
}

fn build_entry(interval: &Interval, upper: &SubtitleTrack, lower: &SubtitleTrack) -> SubtitleEntry {
    let upper_lines = tagged_lines(&interval.upper, upper, LineSource::Upper);
    let lower_lines = tagged_lines(&interval.lower, lower, LineSource::Lower);

    SubtitleEntry::new(0, interval.from, interval.to, upper_lines.chain(lower_lines).collect())
}

fn tagged_lines<'a>(
    indices: &'a [usize],
    track: &'a SubtitleTrack,
    source: LineSource,
) -> impl Iterator<Item = SubtitleLine> + 'a {
    indices
        .iter()
        .flat_map(move |&idx| track.entries[idx].lines.iter())
        .map(move |line| line.with_source(source))
}

/// `upper+lower` when both tracks are labelled, otherwise whichever label exists
fn merged_language(upper: &SubtitleTrack, lower: &SubtitleTrack) -> Option<String> {
    match (&upper.language, &lower.language) {
        (Some(u), Some(l)) => Some(format!("{}+{}", u, l)),
        (Some(u), None) => Some(u.clone()),
        (None, Some(l)) => Some(l.clone()),
        (None, None) => None,
    }
}
