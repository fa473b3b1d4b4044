//! Geometry primitives for plot-relative layouts.
//!
//! Coordinates are in plot units: x grows east, z grows south, y is up.

/// Tolerance for wall-alignment comparisons.
pub const EPSILON: f32 = 0.01;

/// `|a - b| < EPSILON`.
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// `a < b` and not approximately equal.
pub fn less_not_equal(a: f32, b: f32) -> bool {
    a < b && !approx_eq(a, b)
}

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Placement of an opening or fixture: a point plus a yaw about the y axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl Transform {
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees: yaw_degrees.rem_euclid(360.0),
        }
    }
}

/// Axis-aligned rectangle on the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
}

impl Rect {
    pub fn from_center(x: f32, z: f32, width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self {
            min_x: x - hw,
            min_z: z - hh,
            max_x: x + hw,
            max_z: z + hh,
        }
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center_z(&self) -> f32 {
        (self.min_z + self.max_z) / 2.0
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Inclusive overlap test: rectangles that merely touch intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_z <= other.max_z
            && self.max_z >= other.min_z
    }

    /// True if this rectangle lies within `[0, width] x [0, height]`.
    pub fn within(&self, width: f32, height: f32) -> bool {
        self.min_x >= 0.0 && self.min_z >= 0.0 && self.max_x <= width && self.max_z <= height
    }
}
