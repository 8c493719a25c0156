/*!
 * Interval sweep over two tracks.
 *
 * Every start and end of every well-formed cue becomes a boundary. Between two
 * consecutive boundaries the set of active cues on each side is constant, so
 * one `Interval` per non-empty slice describes the whole timeline.
 */

use std::collections::BTreeSet;

use crate::subtitle::SubtitleEntry;
use crate::timestamp::Timestamp;

/// A maximal slice of the timeline with a constant set of active cues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub from: Timestamp,
    pub to: Timestamp,
    /// Indices into the upper track's entries, in track order
    pub upper: Vec<usize>,
    /// Indices into the lower track's entries, in track order
    pub lower: Vec<usize>,
}

/// Result of sweeping two tracks
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    /// Non-degenerate intervals with at least one active cue, in time order
    pub intervals: Vec<Interval>,
    /// Number of candidate slices between boundaries, including empty gaps
    pub slices: usize,
    /// Upper cues ignored because `from >= to`
    pub skipped_upper: usize,
    /// Lower cues ignored because `from >= to`
    pub skipped_lower: usize,
}

/// Tracks which cues of one side are active as the sweep advances
struct SideCursor<'a> {
    entries: &'a [SubtitleEntry],
    by_start: Vec<usize>,
    by_end: Vec<usize>,
    next_start: usize,
    next_end: usize,
    active: BTreeSet<usize>,
}

impl<'a> SideCursor<'a> {
    fn new(entries: &'a [SubtitleEntry]) -> Self {
        let usable: Vec<usize> = (0..entries.len())
            .filter(|&i| entries[i].is_well_formed())
            .collect();

        let mut by_start = usable.clone();
        by_start.sort_by_key(|&i| (entries[i].from, i));

        let mut by_end = usable;
        by_end.sort_by_key(|&i| (entries[i].to, i));

        Self {
            entries,
            by_start,
            by_end,
            next_start: 0,
            next_end: 0,
            active: BTreeSet::new(),
        }
    }

    fn skipped(&self) -> usize {
        self.entries.len() - self.by_start.len()
    }

    fn boundaries(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.by_start
            .iter()
            .flat_map(|&i| [self.entries[i].from, self.entries[i].to])
    }

    /// Make the active set describe the slice starting at `point`.
    ///
    /// Points must be visited in increasing order.
    fn advance_to(&mut self, point: Timestamp) {
        while let Some(&idx) = self.by_end.get(self.next_end) {
            if self.entries[idx].to > point {
                break;
            }
            self.active.remove(&idx);
            self.next_end += 1;
        }

        while let Some(&idx) = self.by_start.get(self.next_start) {
            if self.entries[idx].from > point {
                break;
            }
            // A cue that already ended by now was removed above and must not come back
            if self.entries[idx].to > point {
                self.active.insert(idx);
            }
            self.next_start += 1;
        }
    }

    fn active(&self) -> Vec<usize> {
        self.active.iter().copied().collect()
    }
}

/// Partition the combined timeline of two tracks into active intervals
pub fn sweep(upper: &[SubtitleEntry], lower: &[SubtitleEntry]) -> Sweep {
    let mut upper_cursor = SideCursor::new(upper);
    let mut lower_cursor = SideCursor::new(lower);

    let mut boundaries: Vec<Timestamp> = upper_cursor
        .boundaries()
        .chain(lower_cursor.boundaries())
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut intervals = Vec::new();
    let slices = boundaries.len().saturating_sub(1);

    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);
        upper_cursor.advance_to(from);
        lower_cursor.advance_to(from);

        if upper_cursor.active.is_empty() && lower_cursor.active.is_empty() {
            continue;
        }

        intervals.push(Interval {
            from,
            to,
            upper: upper_cursor.active(),
            lower: lower_cursor.active(),
        });
    }

    Sweep {
        intervals,
        slices,
        skipped_upper: upper_cursor.skipped(),
        skipped_lower: lower_cursor.skipped(),
    }
}
