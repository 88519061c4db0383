//! Exact note-duration arithmetic and minimal decomposition.
//!
//! All segmentation arithmetic runs in integer sixteenth-note ticks rather
//! than quarter-note floats: repeated IEEE-754 subtraction across many bars
//! can drift, integer subtraction cannot.  Quarter-note floats exist only
//! at the API boundary (`Ticks::from_quarters`), which is also where an
//! unrepresentable length is rejected.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::LayoutError;
use crate::model::NoteValue;

/// Sixteenth-note ticks per quarter note.
pub const TICKS_PER_QUARTER: u32 = 4;

/// An exact musical length in sixteenth-note ticks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ticks(pub u32);

impl Ticks {
    pub const ZERO: Ticks = Ticks(0);

    /// Convert a quarter-note length to ticks.
    ///
    /// Fails with `UnrepresentableDuration` unless `quarters` is a
    /// nonnegative exact multiple of 0.25 — multiples of 0.25 are exact in
    /// binary floating point, so the check itself cannot misfire.
    pub fn from_quarters(quarters: f64) -> Result<Ticks, LayoutError> {
        let ticks = quarters * TICKS_PER_QUARTER as f64;
        if !ticks.is_finite() || ticks < 0.0 || ticks.fract() != 0.0 {
            return Err(LayoutError::UnrepresentableDuration { quarters });
        }
        Ok(Ticks(ticks as u32))
    }

    /// Length in quarter-note units (quarter = 1.0).
    pub fn as_quarters(self) -> f64 {
        self.0 as f64 / TICKS_PER_QUARTER as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtraction that reports an impossible (negative) length as `None`
    /// instead of wrapping.
    pub fn checked_sub(self, rhs: Ticks) -> Option<Ticks> {
        self.0.checked_sub(rhs.0).map(Ticks)
    }
}

impl Add for Ticks {
    type Output = Ticks;
    fn add(self, rhs: Ticks) -> Ticks {
        Ticks(self.0 + rhs.0)
    }
}

impl Sub for Ticks {
    type Output = Ticks;
    fn sub(self, rhs: Ticks) -> Ticks {
        Ticks(self.0 - rhs.0)
    }
}

impl AddAssign for Ticks {
    fn add_assign(&mut self, rhs: Ticks) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Ticks {
    type Output = Ticks;
    fn mul(self, rhs: u32) -> Ticks {
        Ticks(self.0 * rhs)
    }
}

/// The fewest standard note values summing exactly to `length`, largest
/// first.
///
/// Greedy subtraction of the largest fitting value is minimal here because
/// the tick weights {16, 8, 4, 2, 1} form a canonical system (each is a
/// multiple of the next).  That property must hold for any future extension
/// of `NoteValue`.
///
/// `decompose(Ticks::ZERO)` is the empty sequence — a note that ends
/// exactly on a bar boundary leaves nothing to fill.
pub fn decompose(length: Ticks) -> Vec<NoteValue> {
    let mut notes = Vec::new();
    let mut remaining = length;
    while !remaining.is_zero() {
        for value in NoteValue::DESCENDING {
            if value.ticks() <= remaining {
                notes.push(value);
                remaining = remaining - value.ticks();
                break;
            }
        }
    }
    notes
}

/// Boundary form of `decompose` for lengths expressed in quarter notes.
///
/// Fails with `UnrepresentableDuration` when `quarters` is not an exact
/// multiple of 0.25; otherwise the returned values sum to `quarters`
/// exactly.
pub fn decompose_quarters(quarters: f64) -> Result<Vec<NoteValue>, LayoutError> {
    Ok(decompose(Ticks::from_quarters(quarters)?))
}
