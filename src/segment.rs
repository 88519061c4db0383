//! Bar segmentation — groups a track's note sequence into bars according
//! to a time signature.
//!
//! The walk keeps a running accumulator of the open bar's length in ticks.
//! A note that would overflow the bar is split into tied fragments: the
//! part before the boundary keeps the original note's flags on its first
//! fragment, and the overflow seeds the next bar as rests (a tied
//! remainder is never re-accented).
//!
//! An overflow longer than one full bar leaves the accumulator past the
//! next bar boundary; no valid bar structure exists from there, so
//! segmentation fails with `UnrepresentableDuration` and the whole track
//! is aborted.

use crate::duration::{decompose, Ticks};
use crate::error::LayoutError;
use crate::model::{Note, TimeSignature};

/// Segment an ordered note sequence into bars.
///
/// Every returned bar's values sum exactly to the bar length.  A trailing
/// partial bar is padded with rests; a track that ends exactly on a bar
/// boundary gets no spurious empty bar.  An empty track yields one
/// full-rest bar so the instrument still occupies a row in the grid.
///
/// Fails with `UnrepresentableDuration` when a split's overflow runs past
/// the next bar boundary (a note longer than the remaining bar plus one
/// full bar, e.g. a whole note in 1/4 time); the error aborts the track.
pub fn segment_track(
    time: &TimeSignature,
    notes: &[Note],
) -> Result<Vec<Vec<Note>>, LayoutError> {
    let bar_len = time.bar_ticks();
    let mut bars: Vec<Vec<Note>> = Vec::new();
    let mut current_len = Ticks::ZERO;
    let mut current_bar: Vec<Note> = Vec::new();

    for note in notes {
        let note_len = note.value.ticks();
        if current_len + note_len == bar_len {
            // Exact fill: close the bar.
            current_bar.push(*note);
            bars.push(std::mem::take(&mut current_bar));
            current_len = Ticks::ZERO;
        } else if current_len + note_len > bar_len {
            // The note straddles the boundary.  The part before the split
            // goes into the current bar, keeping the note's flags on the
            // first fragment only...
            let remaining = bar_capacity(bar_len, current_len)?;
            for (i, value) in decompose(remaining).into_iter().enumerate() {
                if i == 0 {
                    current_bar.push(Note { value, ..*note });
                } else {
                    current_bar.push(Note::rest(value));
                }
            }
            bars.push(std::mem::take(&mut current_bar));

            // ...and the overflow seeds the next bar as rests.
            let overflow = current_len + note_len - bar_len;
            current_bar = decompose(overflow).into_iter().map(Note::rest).collect();
            current_len = overflow;
        } else {
            current_bar.push(*note);
            current_len += note_len;
        }
    }

    // Pad and close a leftover partial bar.  The empty-track case also
    // lands here so the track still gets one full-rest bar.
    if !current_bar.is_empty() || (current_len.is_zero() && notes.is_empty()) {
        let remaining = bar_capacity(bar_len, current_len)?;
        current_bar.extend(decompose(remaining).into_iter().map(Note::rest));
        bars.push(current_bar);
    }

    Ok(bars)
}

/// Remaining capacity of the open bar.  After an overflow split the
/// accumulator holds the whole overflow, which can exceed the bar length;
/// that state has no tiling, so it surfaces as an unrepresentable
/// (negative) remainder instead of wrapping the subtraction.
fn bar_capacity(bar_len: Ticks, current_len: Ticks) -> Result<Ticks, LayoutError> {
    bar_len
        .checked_sub(current_len)
        .ok_or(LayoutError::UnrepresentableDuration {
            quarters: bar_len.as_quarters() - current_len.as_quarters(),
        })
}

/// One full bar of rests for the given time signature.  Used to pad short
/// tracks up to the loop's common bar count (see `layout::render_loop`).
pub fn rest_bar(time: &TimeSignature) -> Vec<Note> {
    decompose(time.bar_ticks())
        .into_iter()
        .map(Note::rest)
        .collect()
}
