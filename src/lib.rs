//! jotlib — percussion loop segmentation and grid layout for Drumjot.
//!
//! A jot is a drum notation document: named instrument tracks, each an
//! ordered sequence of notes and rests, grouped into repeatable loops.
//! This crate turns a jot into a fully positioned, horizontally scrolling
//! grid: notes are segmented into bars by the time signature (splitting
//! boundary-straddling notes into tied fragments), every track of a loop
//! is padded to a common bar count, and each bar and note fragment gets an
//! exact pixel offset for the view layer to consume read-only.
//!
//! The engine is pure and synchronous; `RenderCache` adds an explicit
//! memoization table so unchanged loops are never re-segmented.
//!
//! # Example
//! ```
//! use jotlib::{render_jot, Jot, LoopSpec, Note, NoteValue, RenderOptions, TimeSignature};
//! use std::collections::BTreeMap;
//!
//! let mut tracks = BTreeMap::new();
//! tracks.insert("kick".to_string(), vec![Note::hit(NoteValue::Quarter); 8]);
//!
//! let jot = Jot {
//!     title: "Four on the floor".to_string(),
//!     track_names: vec!["kick".to_string()],
//!     loops: vec![LoopSpec {
//!         time: TimeSignature { count: 4, unit: NoteValue::Quarter },
//!         tracks,
//!         repeats: 2,
//!     }],
//! };
//!
//! let rendered = render_jot(&jot, &RenderOptions::default());
//! let first = rendered.loops[0].as_ref().unwrap();
//! assert_eq!(first.tracks["kick"].bars.len(), 2);
//! ```

pub mod cache;
pub mod duration;
pub mod error;
pub mod layout;
pub mod model;
pub mod segment;
pub mod units;

pub use cache::RenderCache;
pub use duration::{decompose, decompose_quarters, Ticks};
pub use error::LayoutError;
pub use layout::{
    render_jot, render_loop, Bar, RenderOptions, RenderedJot, RenderedLoop, RenderedNote,
    RenderedTrack,
};
pub use model::{Jot, LoopSpec, Note, NoteValue, TimeSignature};
pub use segment::segment_track;
pub use units::{Point, Px, Rect};

/// Serialize a jot to a JSON string (for persistence or data exchange).
pub fn jot_to_json(jot: &Jot) -> Result<String, String> {
    serde_json::to_string_pretty(jot).map_err(|e| format!("JSON serialization error: {e}"))
}

/// Parse a jot from a JSON string, validating the structural invariants
/// the model's types cannot express.
pub fn jot_from_json(json: &str) -> Result<Jot, String> {
    let jot: Jot =
        serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;

    for (i, l) in jot.loops.iter().enumerate() {
        if l.time.count == 0 {
            return Err(format!("loop {i}: time signature count must be positive"));
        }
        if l.time.checked_bar_ticks().is_none() {
            return Err(format!(
                "loop {i}: time signature count {} overflows the bar length",
                l.time.count
            ));
        }
        if l.repeats == 0 {
            return Err(format!("loop {i}: repeats must be positive"));
        }
        for name in l.tracks.keys() {
            if !jot.declares_track(name) {
                return Err(format!("loop {i}: undeclared track '{name}'"));
            }
        }
    }

    Ok(jot)
}

/// Serialize a rendered jot to JSON for the view layer.
pub fn rendered_jot_to_json(rendered: &RenderedJot) -> Result<String, String> {
    serde_json::to_string_pretty(rendered).map_err(|e| format!("JSON serialization error: {e}"))
}
