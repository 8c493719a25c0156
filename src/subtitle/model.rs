/*!
 * Subtitle entry model.
 *
 * Plain owned values: a track owns its entries, an entry owns its lines.
 * Nothing here is shared or mutated after the parser (or the merge engine)
 * has built it.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Which input track a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSource {
    /// The track rendered first (above)
    #[default]
    Upper,
    /// The track rendered second (below)
    Lower,
}

impl fmt::Display for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSource::Upper => write!(f, "upper"),
            LineSource::Lower => write!(f, "lower"),
        }
    }
}

/// One physical line of subtitle text with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtitleLine {
    /// Verbatim line content, without line terminator
    pub text: String,

    /// Track the line came from
    pub source: LineSource,
}

impl SubtitleLine {
    pub fn new(text: impl Into<String>, source: LineSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Same text, different provenance
    pub fn with_source(&self, source: LineSource) -> Self {
        Self {
            text: self.text.clone(),
            source,
        }
    }
}

/// A single timed cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// Sequence number as found in the source text.
    ///
    /// Informational only: serialization always renumbers entries by position.
    pub number: usize,

    /// Start of the cue
    pub from: Timestamp,

    /// End of the cue. May precede `from` in permissively parsed files.
    pub to: Timestamp,

    /// Text lines in display order
    pub lines: Vec<SubtitleLine>,
}

impl SubtitleEntry {
    pub fn new(number: usize, from: Timestamp, to: Timestamp, lines: Vec<SubtitleLine>) -> Self {
        Self {
            number,
            from,
            to,
            lines,
        }
    }

    /// Convenience constructor tagging every line with the same source
    pub fn from_texts<S: AsRef<str>>(
        number: usize,
        from: Timestamp,
        to: Timestamp,
        texts: &[S],
        source: LineSource,
    ) -> Self {
        let lines = texts
            .iter()
            .map(|t| SubtitleLine::new(t.as_ref(), source))
            .collect();
        Self::new(number, from, to, lines)
    }

    /// True when the cue covers a non-empty `[from, to)` interval
    pub fn is_well_formed(&self) -> bool {
        self.from < self.to
    }

    /// Line texts without provenance, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// Lines joined with `\n`, as a viewer would read them
    pub fn rendered_text(&self) -> String {
        self.texts().collect::<Vec<_>>().join("\n")
    }

    /// Copy of this entry with every line tagged `source`
    pub fn retagged(&self, source: LineSource) -> Self {
        Self {
            number: self.number,
            from: self.from,
            to: self.to,
            lines: self.lines.iter().map(|l| l.with_source(source)).collect(),
        }
    }
}

/// Ordered cues parsed from one subtitle source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Cues in source order
    pub entries: Vec<SubtitleEntry>,

    /// Optional language label, for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SubtitleTrack {
    pub fn new(entries: Vec<SubtitleEntry>) -> Self {
        Self {
            entries,
            language: None,
        }
    }

    /// A track with no cues
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach a language label
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of this track with every line tagged `source`
    pub fn retagged(&self, source: LineSource) -> Self {
        Self {
            entries: self.entries.iter().map(|e| e.retagged(source)).collect(),
            language: self.language.clone(),
        }
    }
}
