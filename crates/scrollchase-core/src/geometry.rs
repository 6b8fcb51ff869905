//! 2D scroll offsets and per-axis helpers

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scroll dimension, animated independently of the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Scroll position of a viewport within its content, in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along `axis`
    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy of this point with the `axis` component replaced
    #[inline]
    pub fn with(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => Self { x: value, ..self },
            Axis::Vertical => Self { y: value, ..self },
        }
    }

    /// Per-axis equality within `tolerance`
    ///
    /// Both components must differ by strictly less than `tolerance`.
    #[inline]
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
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

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Parses `"x,y"`; a single number is taken as a vertical offset
impl FromStr for Point {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| crate::Error::Other(format!("invalid offset '{}': {}", s, e)))
        };

        match s.split_once(',') {
            Some((x, y)) => Ok(Point::new(parse(x)?, parse(y)?)),
            None => Ok(Point::new(0.0, parse(s)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_access() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.get(Axis::Horizontal), 3.0);
        assert_eq!(p.get(Axis::Vertical), 4.0);
        assert_eq!(p.with(Axis::Vertical, 9.0), Point::new(3.0, 9.0));
        assert_eq!(p.with(Axis::Horizontal, -1.0), Point::new(-1.0, 4.0));
    }

    #[test]
    fn test_approx_eq() {
        let a = Point::new(10.0, 20.0);
        assert!(a.approx_eq(Point::new(10.05, 19.95), 0.1));
        assert!(!a.approx_eq(Point::new(10.2, 20.0), 0.1));
        assert!(!a.approx_eq(Point::new(10.0, 20.1), 0.1));
    }

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(0.5, -3.0);
        assert_eq!(a + b, Point::new(1.5, -1.0));
        assert_eq!(a - b, Point::new(0.5, 5.0));
    }

    #[test]
    fn test_parse() {
        assert_eq!("12.5, -3".parse::<Point>().unwrap(), Point::new(12.5, -3.0));
        assert_eq!("300".parse::<Point>().unwrap(), Point::new(0.0, 300.0));
        assert!("abc".parse::<Point>().is_err());
        assert!("1,x".parse::<Point>().is_err());
    }
}
