use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2-D vector in element-local pixels. Used for positions, offsets and
/// velocities alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn sub(self, other: Point) -> Point {
        self - other
    }

    pub fn mult(self, k: f64) -> Point {
        self * k
    }

    pub fn mag(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn unit(self) -> Point {
        let mut p = self;
        p.unit_mut();
        p
    }

    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub(crate) fn unit_mut(&mut self) -> &mut Self {
        let m = self.mag();
        if m > 0.0 {
            self.x /= m;
            self.y /= m;
        }
        self
    }

    pub(crate) fn mult_mut(&mut self, k: f64) -> &mut Self {
        self.x *= k;
        self.y *= k;
        self
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
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_and_unit() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.mag(), 5.0);
        let u = p.unit();
        assert!((u.mag() - 1.0).abs() < 1e-12);
        assert!((u.x - 0.6).abs() < 1e-12);
        assert_eq!(Point::ZERO.unit(), Point::ZERO);
    }

    #[test]
    fn in_place_variants_chain() {
        let mut v = Point::new(0.0, -10.0);
        v.unit_mut().mult_mut(7.0);
        assert_eq!(v, Point::new(0.0, -7.0));
    }

    #[test]
    fn operators_match_methods() {
        let a = Point::new(5.0, 1.0);
        let b = Point::new(2.0, 3.0);
        assert_eq!(a.sub(b), Point::new(3.0, -2.0));
        assert_eq!(a.mult(-1.0), Point::new(-5.0, -1.0));
        assert_eq!(a + b, Point::new(7.0, 4.0));
        assert_eq!(a * 2.0, Point::new(10.0, 2.0));
        assert_eq!(a.min(b), Point::new(2.0, 1.0));
        assert_eq!(a.max(b), Point::new(5.0, 3.0));
    }
}
