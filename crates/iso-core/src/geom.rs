use core::ops::{Add, Mul, Sub};

/// Tolerance used when comparing contour endpoints for closure.
pub const CLOSE_EPS: f64 = 1e-9;

/// 2D point in grid-cell units. Crossing coordinates are fractional, so
/// a point `(3.25, 7.0)` lies a quarter-cell right of lattice column 3
/// on row 7.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

/// Displacement between two points, in the same units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Vec2d {
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Sub<Point2d> for Point2d {
    type Output = Vec2d;

    fn sub(self, rhs: Point2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add<Vec2d> for Point2d {
    type Output = Point2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Point2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2d {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Ordered polyline along which the field equals one level.
///
/// A contour is closed when its first and last points coincide; open
/// contours occur only on unpadded grids where an isoline runs off the
/// edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    pub points: Vec<Point2d>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 1 => {
                (a.x - b.x).abs() <= CLOSE_EPS && (a.y - b.y).abs() <= CLOSE_EPS
            }
            _ => false,
        }
    }

    pub fn arc_length(&self) -> f64 {
        let mut len = 0.0_f64;
        for w in self.points.windows(2) {
            len += (w[1] - w[0]).norm();
        }
        len
    }
}
