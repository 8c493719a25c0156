//! Joins back-to-back entries that show the same text.
//!
//! Slicing one track at the other track's boundaries produces runs of
//! identical cues; players would flicker between them.

use crate::subtitle::SubtitleEntry;

/// True when both entries render the same lines, ignoring provenance
pub fn same_rendered_text(a: &SubtitleEntry, b: &SubtitleEntry) -> bool {
    a.lines.len() == b.lines.len() && a.texts().eq(b.texts())
}

/// Merge each entry into its predecessor when `prev.to == next.from` and the
/// rendered text is identical. Returns the remaining entries and how many
/// were absorbed.
///
/// The surviving entry keeps its own lines and takes the later end time.
pub fn coalesce(entries: Vec<SubtitleEntry>) -> (Vec<SubtitleEntry>, usize) {
    let mut out: Vec<SubtitleEntry> = Vec::with_capacity(entries.len());
    let mut absorbed = 0;

    for entry in entries {
        if let Some(prev) = out.last_mut() {
            if prev.to == entry.from && same_rendered_text(prev, &entry) {
                prev.to = entry.to;
                absorbed += 1;
                continue;
            }
        }
        out.push(entry);
    }

    (out, absorbed)
}
