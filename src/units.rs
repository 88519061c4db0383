//! Pixel units and the small axis-aligned geometry primitives consumed by
//! the view layer.
//!
//! Durations (quarter-note weights / ticks) and pixels are distinct numeric
//! spaces.  `Px` keeps them from mixing by accident: the only way from one
//! to the other is an explicit multiplication by the layout scale
//! (`RenderOptions::quarter_note_gap`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A horizontal or vertical distance in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px {
        Px(self.0 - rhs.0)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Px) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px {
        Px(self.0 * rhs)
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Px,
    pub y: Px,
}

impl Point {
    pub fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: Px, dy: Px) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle in screen space (e.g. a marquee selection box).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: Px,
    pub y: Px,
    pub width: Px,
    pub height: Px,
}

impl Rect {
    /// Build a rectangle from two opposite corners, in any order.
    pub fn from_corners(p1: Point, p2: Point) -> Rect {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        Rect {
            x,
            y,
            width: p1.x.max(p2.x) - x,
            height: p1.y.max(p2.y) - y,
        }
    }

    pub fn x2(&self) -> Px {
        self.x + self.width
    }

    pub fn y2(&self) -> Px {
        self.y + self.height
    }

    /// Whether the rectangle strictly contains a point (boundary excluded).
    pub fn encloses(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.x2() && p.y > self.y && p.y < self.y2()
    }
}
