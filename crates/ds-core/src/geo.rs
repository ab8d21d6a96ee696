//! Planar positions and the depot layout.
//!
//! Positions are informational: leg durations come from configuration, not
//! from distances.  They let the visualization place travellers and boxes,
//! and they give each leg its route.

/// A point on the depot floor.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Fixed points of the depot and the optional detours of each leg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Where travellers appear when spawned.
    pub start: Point,
    /// Where pooled boxes wait.
    pub pickup: Point,
    /// Where delivered boxes end up.
    pub delivery: Point,
    /// Intermediate waypoint on every pickup-bound leg.
    pub pickup_via: Option<Point>,
    /// Intermediate waypoint on every delivery-bound leg.
    pub delivery_via: Option<Point>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            start:        Point::new(0.0, 0.0),
            pickup:       Point::new(0.0, 10.0),
            delivery:     Point::new(10.0, 10.0),
            pickup_via:   None,
            delivery_via: None,
        }
    }
}

impl Layout {
    /// Waypoints of a pickup-bound leg; always ends at `pickup`.
    pub fn pickup_route(&self) -> Vec<Point> {
        self.pickup_via.into_iter().chain([self.pickup]).collect()
    }

    /// Waypoints of a delivery-bound leg; always ends at `delivery`.
    pub fn delivery_route(&self) -> Vec<Point> {
        self.delivery_via.into_iter().chain([self.delivery]).collect()
    }
}
