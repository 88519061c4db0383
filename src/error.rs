//! Layout error taxonomy.
//!
//! Both variants are data problems: retrying with the same input yields the
//! same error.  A failure aborts the transform for the enclosing loop only;
//! sibling loops are unaffected (see `layout::render_jot`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum LayoutError {
    /// A quarter-note length has no standard-note tiling: it is not an
    /// exact multiple of the smallest supported value (a sixteenth, 0.25),
    /// or it is negative — a split note's overflow ran past the next bar
    /// boundary.
    #[error("no note composition for length {quarters} (not a nonnegative multiple of 0.25 quarter notes)")]
    UnrepresentableDuration { quarters: f64 },

    /// A loop references a track name absent from the jot's declared track
    /// list.  The loop is invalid and should be rejected, not partially
    /// rendered.
    #[error("loop references undeclared track '{name}'")]
    UndeclaredTrack { name: String },
}
