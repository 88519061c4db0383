//! Explicit memoization of loop rendering.
//!
//! Re-rendering a jot whose note data has not changed must not re-run the
//! O(notes) segmentation work.  The cache keys each loop by the structural
//! hash of its `LoopSpec` and the declared track list — the input model is
//! float-free and `Hash`-derived, so any edit yields a different key and
//! stale entries are simply never hit again.
//!
//! `RenderOptions` carries pixel floats and does not participate in the
//! key: a cache is built for one options value, and a new cache replaces
//! it when the options change.

use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::error::LayoutError;
use crate::layout::{self, RenderOptions, RenderedJot, RenderedLoop};
use crate::model::{Jot, LoopSpec};
use crate::units::Px;

/// A memoizing wrapper around `layout::render_loop`.
#[derive(Debug)]
pub struct RenderCache {
    options: RenderOptions,
    loops: HashMap<u64, RenderedLoop>,
    segmentations: u64,
}

impl RenderCache {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            loops: HashMap::new(),
            segmentations: 0,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// How many per-track segmentation passes have run since creation (or
    /// the last `clear`).  Flat across repeated calls on unchanged input —
    /// tests use this to observe that memoization holds.
    pub fn segmentations(&self) -> u64 {
        self.segmentations
    }

    /// Drop all cached renders.  Needed only if a caller mutated note data
    /// in place instead of producing a structurally new `LoopSpec`.
    pub fn clear(&mut self) {
        self.loops.clear();
    }

    /// Render one loop, reusing the cached tree when the input is
    /// unchanged.  The returned loop has `x == 0`.
    pub fn render_loop(
        &mut self,
        spec: &LoopSpec,
        track_names: &[String],
    ) -> Result<&RenderedLoop, LayoutError> {
        let key = loop_key(spec, track_names);
        match self.loops.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let rendered = layout::render_loop(spec, track_names, &self.options)?;
                self.segmentations += spec.tracks.len() as u64;
                Ok(entry.insert(rendered))
            }
        }
    }

    /// Render a whole jot through the cache, positioning loops the same
    /// way `layout::render_jot` does.
    pub fn render_jot(&mut self, jot: &Jot) -> RenderedJot {
        let mut x = Px::ZERO;
        let mut loops = Vec::with_capacity(jot.loops.len());

        for spec in &jot.loops {
            match self.render_loop(spec, &jot.track_names) {
                Ok(rendered) => {
                    let mut placed = rendered.clone();
                    placed.x = x;
                    x += placed.width * spec.repeats as f64;
                    loops.push(Ok(placed));
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
}

fn loop_key(spec: &LoopSpec, track_names: &[String]) -> u64 {
    let mut hasher = DefaultHasher::new();
    spec.hash(&mut hasher);
    track_names.hash(&mut hasher);
    hasher.finish()
}
