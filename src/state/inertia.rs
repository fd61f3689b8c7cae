use std::collections::VecDeque;

use crate::easing::Easing;
use crate::point::Point;

pub const INERTIA_LINEARITY: f64 = 0.3;
pub const INERTIA_MAX_SPEED: f64 = 1400.0; // px/s
pub const INERTIA_DECELERATION: f64 = 2500.0; // px/s^2
pub const INERTIA_CUTOFF_MS: f64 = 160.0;

/// Curve the fling pan runs on. `Fling::offset` halves `velocity * duration`
/// to approximate the distance covered under this particular curve; a
/// different curve needs a different factor.
pub fn inertia_easing() -> Easing {
    Easing::bezier(0.0, 0.0, INERTIA_LINEARITY, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaSample {
    pub time: f64,
    pub point: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    pub velocity: Point,
    pub speed: f64,
    pub offset: Point,
    pub duration_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct InertiaBuffer {
    samples: VecDeque<InertiaSample>,
}

impl InertiaBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, time: f64, point: Point) {
        self.samples.clear();
        self.samples.push_back(InertiaSample { time, point });
    }

    pub fn drain(&mut self, now: f64) {
        while let Some(front) = self.samples.front() {
            if now - front.time > INERTIA_CUTOFF_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn push(&mut self, time: f64, point: Point) {
        self.drain(time);
        self.samples.push_back(InertiaSample { time, point });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &InertiaSample> {
        self.samples.iter()
    }

    /// Follow-through pan for a release now, from the oldest and newest
    /// surviving samples. `None` means the drag ends without a fling.
    pub fn fling(&self) -> Option<Fling> {
        if self.samples.len() < 2 {
            return None;
        }
        let first = self.samples.front()?;
        let last = self.samples.back()?;
        let fling_offset = last.point - first.point;
        let fling_duration = (last.time - first.time) / 1000.0;
        if fling_duration == 0.0 || last.point == first.point {
            return None;
        }

        let mut velocity = fling_offset.mult(INERTIA_LINEARITY / fling_duration);
        let mut speed = velocity.mag();
        if speed > INERTIA_MAX_SPEED {
            speed = INERTIA_MAX_SPEED;
            velocity.unit_mut().mult_mut(speed);
        }

        let duration = speed / (INERTIA_DECELERATION * INERTIA_LINEARITY);
        Some(Fling {
            velocity,
            speed,
            offset: velocity.mult(-duration / 2.0),
            duration_ms: duration * 1000.0,
        })
    }
}
