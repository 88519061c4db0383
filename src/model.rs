//! Data model for a percussion jot (a drum notation document).
//!
//! These structures capture the notation as authored: note values, time
//! signatures, per-instrument note sequences, and the loops that group
//! them.  The layout engine consumes this model read-only and returns a
//! freshly allocated output tree (`layout::RenderedJot`).
//!
//! The model contains no floating-point fields, so every type derives
//! `Eq + Hash` and can key the memoization table (`cache::RenderCache`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::duration::Ticks;

/// A standard note value, ordered by musical length.
///
/// This is a closed vocabulary: segmentation only ever emits these five
/// values, and the weight table is exhaustively matched so extending the
/// enum is a compile error until every table is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoteValue {
    Sixteenth,
    Eighth,
    Quarter,
    Half,
    Whole,
}

impl NoteValue {
    /// All values, largest first.  The greedy decomposition walks this
    /// order (see `duration::decompose`).
    pub const DESCENDING: [NoteValue; 5] = [
        NoteValue::Whole,
        NoteValue::Half,
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
    ];

    /// Exact length in sixteenth-note ticks.
    pub fn ticks(self) -> Ticks {
        match self {
            NoteValue::Sixteenth => Ticks(1),
            NoteValue::Eighth => Ticks(2),
            NoteValue::Quarter => Ticks(4),
            NoteValue::Half => Ticks(8),
            NoteValue::Whole => Ticks(16),
        }
    }

    /// Length in quarter-note units (quarter = 1.0).  Display/layout form
    /// of `ticks()`; never used for segmentation arithmetic.
    pub fn quarters(self) -> f64 {
        self.ticks().as_quarters()
    }
}

/// Time signature of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Number of `unit`s per bar (e.g. 4 in 4/4).  Must be positive; the
    /// JSON loader rejects zero.
    pub count: u32,
    /// The note value of one beat (e.g. `Quarter` in 4/4).
    pub unit: NoteValue,
}

impl TimeSignature {
    /// Length of one bar in ticks.  Positive whenever `count` is.  Assumes
    /// a sane `count`; untrusted input goes through `checked_bar_ticks`
    /// (the JSON loader rejects counts whose bar length overflows).
    pub fn bar_ticks(&self) -> Ticks {
        self.unit.ticks() * self.count
    }

    /// Checked form of `bar_ticks` for untrusted input: `None` when
    /// `unit.ticks() * count` overflows.
    pub fn checked_bar_ticks(&self) -> Option<Ticks> {
        self.unit.ticks().0.checked_mul(self.count).map(Ticks)
    }
}

/// A single note or rest in a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Whether the note is accented (played louder).  Inert on rests.
    pub accent: bool,
    /// Whether this is a rest (no hit rendered).
    pub rest: bool,
    /// A divisor of `value`, e.g. 3 for a triplet.  Carried through
    /// segmentation untouched; it scales the downstream visual width only
    /// and never participates in bar-length arithmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhythm_divisor: Option<u32>,
    /// The note value.
    pub value: NoteValue,
}

impl Note {
    /// A plain (unaccented) hit.
    pub fn hit(value: NoteValue) -> Note {
        Note {
            accent: false,
            rest: false,
            rhythm_divisor: None,
            value,
        }
    }

    /// An accented hit.
    pub fn accented(value: NoteValue) -> Note {
        Note {
            accent: true,
            ..Note::hit(value)
        }
    }

    /// A rest of the given value.
    pub fn rest(value: NoteValue) -> Note {
        Note {
            rest: true,
            ..Note::hit(value)
        }
    }
}

/// A repeatable block of notation across all tracks.
///
/// Owned by the caller and treated as an immutable value: any edit should
/// produce a structurally distinct `LoopSpec` (the memoization contract in
/// `cache` relies on this).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoopSpec {
    pub time: TimeSignature,
    /// Note sequence per track name.  A `BTreeMap` keeps iteration order
    /// deterministic, which the structural hash depends on.  Every key must
    /// appear in the owning jot's `track_names`.
    pub tracks: BTreeMap<String, Vec<Note>>,
    /// How many times the loop plays before the next loop begins.  Must be
    /// positive; the JSON loader rejects zero.
    pub repeats: u32,
}

/// A complete jot: the document root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jot {
    pub title: String,
    /// Declared instruments, in display order.  Position in this list
    /// selects the track's palette color.
    pub track_names: Vec<String>,
    pub loops: Vec<LoopSpec>,
}

impl Jot {
    /// Whether `name` is a declared track of this jot.
    pub fn declares_track(&self, name: &str) -> bool {
        self.track_names.iter().any(|n| n == name)
    }
}
