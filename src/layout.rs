//! Loop & jot layout — assigns pixel geometry to segmented bars.
//!
//! Segmentation (`segment`) decides *which* notes land in which bar; this
//! module decides *where* they sit: per-note offsets inside the bar, bar
//! offsets inside the track, cross-track padding to a common bar count,
//! and the running offset of successive loops in the jot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LayoutError;
use crate::model::{Jot, LoopSpec, Note, NoteValue, TimeSignature};
use crate::segment::{rest_bar, segment_track};
use crate::units::Px;

// ── Layout defaults (all in screen pixels) ──────────────────────────
pub const DEFAULT_QUARTER_NOTE_GAP: Px = Px(48.0);
pub const DEFAULT_NOTE_WIDTH: Px = Px(12.0);
pub const DEFAULT_TRACK_HEIGHT: Px = Px(24.0);
/// Hairline reserved at the end of each bar for the bar border.
pub const BAR_BORDER: Px = Px(1.0);
/// Fallback note color when the palette is empty.
pub const DEFAULT_NOTE_COLOR: &str = "#1a1a1a";
/// Default track palette, assigned positionally by declaration order.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#4a9af5", "#f5734a", "#8bc34a", "#f5c84a", "#b04af5", "#4af5d2",
];

/// Layout configuration.  All dimensions are positive pixel values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Width of one quarter note.  This is the only bridge between the
    /// duration space and the pixel space.
    pub quarter_note_gap: Px,
    /// Visual width of a note marker (consumed by the view layer).
    pub note_width: Px,
    /// Vertical height of one track row.
    pub track_height: Px,
    /// Colors assigned to tracks by their position in the declared track
    /// list.  Cycles when there are more tracks than colors.
    pub palette: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            quarter_note_gap: DEFAULT_QUARTER_NOTE_GAP,
            note_width: DEFAULT_NOTE_WIDTH,
            track_height: DEFAULT_TRACK_HEIGHT,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl RenderOptions {
    /// Color for the track at `index` in the declared track list.
    pub fn color_for(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_NOTE_COLOR.to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }

    /// Pixel width of a note value at this layout scale.
    pub fn value_width(&self, value: NoteValue) -> Px {
        self.quarter_note_gap * value.quarters()
    }

    /// Pixel width of one bar: its length in quarters at the layout scale,
    /// plus a hairline for the bar border.
    pub fn bar_width(&self, time: &TimeSignature) -> Px {
        self.quarter_note_gap * time.bar_ticks().as_quarters() + BAR_BORDER
    }
}

// ── Output tree ─────────────────────────────────────────────────────
//
// Freshly allocated on every render; the input model is never mutated.
// The view layer consumes these read-only and maps the pixel fields
// straight to screen positions — it must not re-derive segmentation.

/// A note fragment with its offset from the start of its bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedNote {
    pub accent: bool,
    pub rest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhythm_divisor: Option<u32>,
    pub value: NoteValue,
    /// Offset from the start of the enclosing bar.
    pub x: Px,
}

impl RenderedNote {
    fn place(note: Note, x: Px) -> RenderedNote {
        RenderedNote {
            accent: note.accent,
            rest: note.rest,
            rhythm_divisor: note.rhythm_divisor,
            value: note.value,
            x,
        }
    }
}

/// One bar of a rendered track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Offset from the start of the loop.
    pub x: Px,
    pub notes: Vec<RenderedNote>,
}

/// One instrument row of a rendered loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTrack {
    pub color: String,
    pub height: Px,
    pub bars: Vec<Bar>,
}

/// A fully positioned loop.  Every track has the same bar count, so the
/// grid renders all instruments in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedLoop {
    pub time: TimeSignature,
    /// Offset of this loop within the jot (set by `render_jot`).
    pub x: Px,
    /// Width of one repetition of the loop.
    pub width: Px,
    pub bar_width: Px,
    pub tracks: BTreeMap<String, RenderedTrack>,
    pub repeats: u32,
}

/// A fully positioned jot.  Loops that failed to render occupy their slot
/// as an error so one bad loop never blocks its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedJot {
    pub title: String,
    pub track_names: Vec<String>,
    pub loops: Vec<Result<RenderedLoop, LayoutError>>,
}

// ── Layout computation ──────────────────────────────────────────────

/// Render one loop: segment every track, pad all tracks to the loop's
/// largest bar count with full-rest bars, and assign pixel offsets.
///
/// Track names referenced by the loop must appear in `track_names`;
/// an undeclared reference fails with `UndeclaredTrack`.  A declared
/// track *absent* from the loop is fine — the view renders an empty cell.
/// A segmentation failure in any track (`UnrepresentableDuration`) aborts
/// the whole loop.
///
/// The returned loop has `x == 0`; `render_jot` positions it within the
/// sequence.
pub fn render_loop(
    spec: &LoopSpec,
    track_names: &[String],
    options: &RenderOptions,
) -> Result<RenderedLoop, LayoutError> {
    for name in spec.tracks.keys() {
        if !track_names.iter().any(|n| n == name) {
            return Err(LayoutError::UndeclaredTrack { name: name.clone() });
        }
    }

    let bar_width = options.bar_width(&spec.time);

    // Segment every present track first; padding needs the widest one.
    let mut segmented: Vec<(usize, &String, Vec<Vec<Note>>)> = Vec::new();
    for (index, name) in track_names.iter().enumerate() {
        if let Some(notes) = spec.tracks.get(name) {
            segmented.push((index, name, segment_track(&spec.time, notes)?));
        }
    }
    let max_bars = segmented.iter().map(|(_, _, bars)| bars.len()).max().unwrap_or(0);
    let padding_bar = rest_bar(&spec.time);

    let mut tracks = BTreeMap::new();
    for (index, name, mut bars) in segmented {
        while bars.len() < max_bars {
            bars.push(padding_bar.clone());
        }

        let rendered_bars = bars
            .into_iter()
            .enumerate()
            .map(|(bar_index, bar_notes)| {
                let mut x = Px::ZERO;
                let notes = bar_notes
                    .into_iter()
                    .map(|note| {
                        let placed = RenderedNote::place(note, x);
                        x += options.value_width(note.value);
                        placed
                    })
                    .collect();
                Bar {
                    x: bar_width * bar_index as f64,
                    notes,
                }
            })
            .collect();

        tracks.insert(
            name.clone(),
            RenderedTrack {
                color: options.color_for(index),
                height: options.track_height,
                bars: rendered_bars,
            },
        );
    }

    Ok(RenderedLoop {
        time: spec.time,
        x: Px::ZERO,
        width: bar_width * max_bars as f64,
        bar_width,
        tracks,
        repeats: spec.repeats,
    })
}

/// Render a whole jot, laying loops out left to right.  Each loop's offset
/// is the running total of `previous width × previous repeats`; a failed
/// loop keeps its slot but contributes no width.
pub fn render_jot(jot: &Jot, options: &RenderOptions) -> RenderedJot {
    let mut x = Px::ZERO;
    let mut loops = Vec::with_capacity(jot.loops.len());

    for spec in &jot.loops {
        match render_loop(spec, &jot.track_names, options) {
            Ok(mut rendered) => {
                rendered.x = x;
                x += rendered.width * spec.repeats as f64;
                loops.push(Ok(rendered));
            }
            Err(e) => loops.push(Err(e)),
        }
    }

    RenderedJot {
        title: jot.title.clone(),
        track_names: jot.track_names.clone(),
        loops,
    }
}
