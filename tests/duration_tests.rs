//! Duration arithmetic tests — exactness, minimality, and boundary
//! rejection of the decomposition routine.

use jotlib::{decompose, decompose_quarters, LayoutError, NoteValue, Ticks};
use pretty_assertions::assert_eq;

/// Brute-force minimal note count for a tick length (reference for the
/// greedy optimality check).
fn minimal_count(ticks: u32) -> u32 {
    let weights = [16u32, 8, 4, 2, 1];
    let mut best = vec![u32::MAX; ticks as usize + 1];
    best[0] = 0;
    for len in 1..=ticks as usize {
        for &w in &weights {
            if w as usize <= len && best[len - w as usize] != u32::MAX {
                best[len] = best[len].min(best[len - w as usize] + 1);
            }
        }
    }
    best[ticks as usize]
}

#[test]
fn decompose_sums_exactly() {
    for ticks in 0..=64u32 {
        let notes = decompose(Ticks(ticks));
        let total: u32 = notes.iter().map(|v| v.ticks().0).sum();
        assert_eq!(total, ticks, "Decomposition of {ticks} ticks should sum exactly");
    }
}

#[test]
fn decompose_is_minimal() {
    for ticks in 0..=64u32 {
        let notes = decompose(Ticks(ticks));
        assert_eq!(
            notes.len() as u32,
            minimal_count(ticks),
            "Greedy decomposition of {ticks} ticks should use the fewest notes"
        );
    }
}

#[test]
fn decompose_is_largest_first() {
    for ticks in 0..=64u32 {
        let notes = decompose(Ticks(ticks));
        for pair in notes.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "Decomposition of {ticks} ticks should be ordered largest first"
            );
        }
    }
}

#[test]
fn decompose_zero_is_empty() {
    assert_eq!(decompose(Ticks::ZERO), vec![]);
}

#[test]
fn decompose_concrete_lengths() {
    use NoteValue::*;
    assert_eq!(decompose(Ticks(4)), vec![Quarter]);
    assert_eq!(decompose(Ticks(6)), vec![Quarter, Eighth]);
    assert_eq!(decompose(Ticks(16)), vec![Whole]);
    // A 5-quarter length straddling a 4/4 bar: 4 quarters + 1 quarter.
    assert_eq!(decompose(Ticks(20)), vec![Whole, Quarter]);
    assert_eq!(decompose(Ticks(15)), vec![Half, Quarter, Eighth, Sixteenth]);
}

#[test]
fn decompose_quarters_accepts_multiples_of_a_sixteenth() {
    for k in 0..=32u32 {
        let quarters = k as f64 * 0.25;
        let notes = decompose_quarters(quarters)
            .unwrap_or_else(|e| panic!("{quarters} quarters should decompose: {e}"));
        let total: f64 = notes.iter().map(|v| v.quarters()).sum();
        assert_eq!(total, quarters, "Sum for {quarters} quarters should be exact");
    }
}

#[test]
fn decompose_quarters_rejects_inexact_lengths() {
    for quarters in [0.3, 1.1, 2.26, -1.0, f64::NAN, f64::INFINITY] {
        let err = decompose_quarters(quarters)
            .expect_err("non-multiple of 0.25 should be unrepresentable");
        assert!(
            matches!(err, LayoutError::UnrepresentableDuration { .. }),
            "Expected UnrepresentableDuration for {quarters}, got {err:?}"
        );
    }
}

#[test]
fn ticks_quarter_roundtrip() {
    for k in 0..=64u32 {
        let ticks = Ticks(k);
        assert_eq!(
            Ticks::from_quarters(ticks.as_quarters()).unwrap(),
            ticks,
            "Tick/quarter roundtrip should be exact for {k} ticks"
        );
    }
}

#[test]
fn note_value_weights() {
    use NoteValue::*;
    assert_eq!(Sixteenth.quarters(), 0.25);
    assert_eq!(Eighth.quarters(), 0.5);
    assert_eq!(Quarter.quarters(), 1.0);
    assert_eq!(Half.quarters(), 2.0);
    assert_eq!(Whole.quarters(), 4.0);
}
