//! Timing curves for camera animations.

const NEWTON_ITERATIONS: usize = 8;
const EPSILON: f64 = 1e-6;

/// Cubic bezier timing curve through (0,0), (p1x,p1y), (p2x,p2y), (1,1),
/// the same shape as CSS `cubic-bezier()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitBezier {
    cx: f64,
    bx: f64,
    ax: f64,
    cy: f64,
    by: f64,
    ay: f64,
}

impl UnitBezier {
    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        let cx = 3.0 * p1x;
        let bx = 3.0 * (p2x - p1x) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * p1y;
        let by = 3.0 * (p2y - p1y) - cy;
        let ay = 1.0 - cy - by;
        Self { cx, bx, ax, cy, by, ay }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    // Newton first, bisection when the slope is too flat to converge.
    fn solve_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let x2 = self.sample_x(t) - x;
            if x2.abs() < EPSILON {
                return t;
            }
            let d2 = self.sample_dx(t);
            if d2.abs() < EPSILON {
                break;
            }
            t -= x2 / d2;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x.clamp(lo, hi);
        while lo < hi {
            let x2 = self.sample_x(t);
            if (x2 - x).abs() < EPSILON {
                return t;
            }
            if x > x2 {
                lo = t;
            } else {
                hi = t;
            }
            let next = (hi - lo) * 0.5 + lo;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }

    pub fn solve(&self, x: f64) -> f64 {
        self.sample_y(self.solve_x(x.clamp(0.0, 1.0)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    Bezier(UnitBezier),
}

impl Easing {
    pub fn bezier(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        Easing::Bezier(UnitBezier::new(p1x, p1y, p2x, p2y))
    }

    /// The default camera ease, `ease` in CSS terms.
    pub fn ease() -> Self {
        Easing::bezier(0.25, 0.1, 0.25, 1.0)
    }

    /// Maps animation progress in `[0, 1]` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Bezier(b) => b.solve(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        let e = Easing::bezier(0.0, 0.0, 0.3, 1.0);
        assert!(e.apply(0.0).abs() < 1e-6);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inertia_curve_eases_out() {
        let e = Easing::bezier(0.0, 0.0, 0.3, 1.0);
        // front-loaded: more than half of the distance in the first half
        assert!(e.apply(0.5) > 0.5);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = e.apply(i as f64 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn linear_is_identity_and_clamped() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
    }
}
