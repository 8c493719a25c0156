/*!
 * Validation of parsed subtitle tracks.
 *
 * - `timecodes`: reports cues the merge engine will ignore, plus overlaps and gaps
 */

pub mod timecodes;

pub use timecodes::{TimecodeIssue, TimecodeValidationResult, TimecodeValidator, TimecodeValidatorConfig};
