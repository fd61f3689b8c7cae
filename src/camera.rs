//! The camera collaborator the gesture handlers steer.

use crate::easing::Easing;
use crate::geo::{LngLat, LngLatBounds};
use crate::model::Input;
use crate::point::Point;

pub const DEFAULT_DURATION_MS: f64 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOptions {
    pub duration_ms: f64,
    pub easing: Easing,
    /// The caller already fired `movestart` for this motion.
    pub no_move_start: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::ease(),
            no_move_start: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBoundsOptions {
    pub linear: bool,
    pub padding: f64,
    pub duration_ms: f64,
}

impl Default for FitBoundsOptions {
    fn default() -> Self {
        Self {
            linear: false,
            padding: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraFrame {
    pub started: bool,
    pub moved: bool,
    pub finished: bool,
    pub origin: Option<Input>,
}

/// View transform plus animation scheduling. At most one animation runs at a
/// time; starting another replaces it.
pub trait Camera {
    fn unproject(&self, point: Point) -> LngLat;

    /// Location under `point` on the live transform. Same as `unproject`
    /// unless the camera keeps a separate render transform.
    fn point_location(&self, point: Point) -> LngLat {
        self.unproject(point)
    }

    fn set_location_at_point(&mut self, loc: LngLat, point: Point);

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitBoundsOptions);

    fn pan_by(&mut self, offset: Point, options: AnimationOptions, origin: Option<Input>);

    fn zoom_around(&mut self, factor: f64, around: Point);

    fn stop(&mut self) -> bool;

    fn advance(&mut self, now: f64) -> CameraFrame;
}
