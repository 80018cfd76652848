//! 2D geometry for marker positions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// An immutable 2D point in pixel space.
///
/// All arithmetic produces a new point; operands are never mutated.
/// Deserializes from either `{"x": .., "y": ..}` or `[x, y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair([f64; 2]),
    Named { x: f64, y: f64 },
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Pair([x, y]) => Point { x, y },
            PointRepr::Named { x, y } => Point { x, y },
        }
    }
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point with both components set to `v`
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Linear interpolation: `a + (b - a) * t`.
///
/// `t` is not clamped; callers keep it within [0, 1].
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -3.0);

        assert_eq!(a + b, Point::new(5.0, -1.0));
        assert_eq!(b - a, Point::new(3.0, -5.0));
        assert_eq!(a * 3.0, Point::new(3.0, 6.0));

        // operands untouched
        assert_eq!(a, Point::new(1.0, 2.0));
        assert_eq!(b, Point::new(4.0, -3.0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(180.0, 135.0);

        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Point::new(95.0, 72.5));
    }

    #[test]
    fn test_lerp_is_unclamped() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        assert_eq!(lerp(a, b, 1.5), Point::new(15.0, 0.0));
        assert_eq!(lerp(a, b, -0.5), Point::new(-5.0, 0.0));
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let pair: Point = serde_json::from_str("[40, 65]").unwrap();
        let named: Point = serde_json::from_str(r#"{"x": 40.0, "y": 65.0}"#).unwrap();

        assert_eq!(pair, Point::new(40.0, 65.0));
        assert_eq!(pair, named);
        assert!(serde_json::from_str::<Point>("[40]").is_err());
        assert!(serde_json::from_str::<Point>(r#""40,65""#).is_err());
    }
}
