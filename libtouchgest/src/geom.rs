use euclid;
use std::fmt::Debug;

pub use euclid::vec2;

/// Screen pixels, as reported by the touch surface.
pub struct Px;
pub type Point = euclid::Vector2D<f64, Px>;
pub type Size = euclid::Size2D<f64, Px>;

/// Returns the angle of `v`, measured from the positive x axis towards the positive y axis.
///
/// The result is in the interval `[-π, π]`.
pub fn angle(v: Point) -> f64 {
    v.y.atan2(v.x)
}

/// Returns the unsigned angle between `v` and the vertical axis.
///
/// The result is in the interval `[0, π]`: both `(0, 1)` and `(0, -1)` are "vertical", one at
/// `0` and the other at `π`.
///
/// ```
/// use libtouchgest::geom::{angle_from_vertical, vec2};
/// use std::f64::consts::PI;
///
/// assert_eq!(angle_from_vertical(vec2(0.0, 10.0)), 0.0);
/// assert_eq!(angle_from_vertical(vec2(0.0, -10.0)), PI);
/// assert_eq!(angle_from_vertical(vec2(10.0, 0.0)), PI / 2.0);
/// ```
pub fn angle_from_vertical(v: Point) -> f64 {
    v.x.atan2(v.y).abs()
}

/// Supplies the dimensions of the touch surface.
///
/// Two-finger detectors query this every time they decide whether a gesture is "sloppy", so
/// implementations that track rotation or resizing will be picked up on the next check.
pub trait Geometry: Debug {
    /// The size of the whole surface, in device-absolute pixels.
    fn surface_size(&self) -> Size;

    /// The width of the band along every edge in which contacts are considered unreliable.
    fn edge_slop(&self) -> f64;
}

/// A `Geometry` that never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedGeometry {
    size: Size,
    edge_slop: f64,
}

/// The edge slop used when nothing better is known, in pixels.
pub const DEFAULT_EDGE_SLOP: f64 = 12.0;

impl FixedGeometry {
    /// Creates a new `FixedGeometry` for a `width` by `height` surface.
    pub fn new(width: f64, height: f64, edge_slop: f64) -> FixedGeometry {
        FixedGeometry {
            size: euclid::size2(width, height),
            edge_slop: edge_slop,
        }
    }
}

impl Geometry for FixedGeometry {
    fn surface_size(&self) -> Size {
        self.size
    }

    fn edge_slop(&self) -> f64 {
        self.edge_slop
    }
}
