/*!
 * SubRip subtitle handling: the entry model, the parser and the serializer.
 */

pub mod model;
pub mod parser;
pub mod serializer;

pub use model::{LineSource, SubtitleEntry, SubtitleLine, SubtitleTrack};
pub use parser::{parse, parse_with_source};
pub use serializer::{serialize, serialize_with, LineEnding};
