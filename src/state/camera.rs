use crate::camera::{AnimationOptions, Camera, CameraFrame, FitBoundsOptions};
use crate::easing::Easing;
use crate::geo::{LngLat, LngLatBounds};
use crate::model::Input;
use crate::point::Point;

/// Flat pan/zoom camera: screen = world * scale + offset. Locations are plain
/// world coordinates (`lng` = x, `lat` = y).
#[derive(Debug, Clone)]
pub struct PlanarCamera {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    animation: Option<Animation>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct View {
    scale: f64,
    center: LngLat,
}

#[derive(Debug, Clone)]
struct Animation {
    from: View,
    to: View,
    duration_ms: f64,
    easing: Easing,
    no_move_start: bool,
    start: Option<f64>,
    origin: Option<Input>,
}

impl Default for PlanarCamera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width: 800.0,
            height: 600.0,
            min_scale: 0.1,
            max_scale: 40.0,
            animation: None,
        }
    }
}

impl PlanarCamera {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn is_easing(&self) -> bool {
        self.animation.is_some()
    }

    /// Screen position of a world location.
    pub fn project(&self, loc: LngLat) -> Point {
        Point::new(
            loc.lng * self.scale + self.offset_x,
            loc.lat * self.scale + self.offset_y,
        )
    }

    pub fn center(&self) -> LngLat {
        self.unproject(Point::new(self.width * 0.5, self.height * 0.5))
    }

    /// Puts `center` in the middle of the viewport at the current scale.
    pub fn jump_to(&mut self, center: LngLat) {
        self.apply(View {
            scale: self.scale,
            center,
        });
    }

    fn view(&self) -> View {
        View {
            scale: self.scale,
            center: self.center(),
        }
    }

    fn apply(&mut self, view: View) {
        self.scale = view.scale;
        self.offset_x = self.width * 0.5 - view.center.lng * view.scale;
        self.offset_y = self.height * 0.5 - view.center.lat * view.scale;
    }

    fn ease_to(
        &mut self,
        to: View,
        duration_ms: f64,
        easing: Easing,
        no_move_start: bool,
        origin: Option<Input>,
    ) {
        self.animation = Some(Animation {
            from: self.view(),
            to,
            duration_ms,
            easing,
            no_move_start,
            start: None,
            origin,
        });
    }
}

impl Camera for PlanarCamera {
    fn unproject(&self, point: Point) -> LngLat {
        LngLat::new(
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }

    fn set_location_at_point(&mut self, loc: LngLat, point: Point) {
        self.offset_x = point.x - loc.lng * self.scale;
        self.offset_y = point.y - loc.lat * self.scale;
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitBoundsOptions) {
        let avail_w = (self.width - 2.0 * options.padding).max(1.0);
        let avail_h = (self.height - 2.0 * options.padding).max(1.0);
        let fit = match (bounds.width() > 0.0, bounds.height() > 0.0) {
            (true, true) => (avail_w / bounds.width()).min(avail_h / bounds.height()),
            (true, false) => avail_w / bounds.width(),
            (false, true) => avail_h / bounds.height(),
            (false, false) => self.scale,
        };
        let to = View {
            scale: fit.clamp(self.min_scale, self.max_scale),
            center: bounds.center(),
        };
        let easing = if options.linear {
            Easing::Linear
        } else {
            Easing::ease()
        };
        self.ease_to(to, options.duration_ms, easing, false, None);
    }

    fn pan_by(&mut self, offset: Point, options: AnimationOptions, origin: Option<Input>) {
        let from = self.view();
        let to = View {
            scale: from.scale,
            center: LngLat::new(
                from.center.lng + offset.x / from.scale,
                from.center.lat + offset.y / from.scale,
            ),
        };
        self.ease_to(
            to,
            options.duration_ms,
            options.easing,
            options.no_move_start,
            origin,
        );
    }

    // world point under the cursor stays put
    fn zoom_around(&mut self, factor: f64, around: Point) {
        let old_scale = self.scale;
        let world_x = (around.x - self.offset_x) / old_scale;
        let world_y = (around.y - self.offset_y) / old_scale;
        self.scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        self.offset_x = around.x - world_x * self.scale;
        self.offset_y = around.y - world_y * self.scale;
    }

    fn stop(&mut self) -> bool {
        self.animation.take().is_some()
    }

    fn advance(&mut self, now: f64) -> CameraFrame {
        let Some(anim) = self.animation.as_mut() else {
            return CameraFrame::default();
        };
        let first = anim.start.is_none();
        let start = *anim.start.get_or_insert(now);
        let t = if anim.duration_ms <= 0.0 {
            1.0
        } else {
            ((now - start) / anim.duration_ms).min(1.0)
        };
        let k = anim.easing.apply(t);
        let (from, to) = (anim.from, anim.to);
        let started = first && !anim.no_move_start;
        let view = View {
            scale: from.scale + (to.scale - from.scale) * k,
            center: LngLat::new(
                from.center.lng + (to.center.lng - from.center.lng) * k,
                from.center.lat + (to.center.lat - from.center.lat) * k,
            ),
        };
        self.apply(view);

        if t < 1.0 {
            return CameraFrame {
                started,
                moved: true,
                finished: false,
                origin: None,
            };
        }
        let origin = self.animation.take().and_then(|a| a.origin);
        CameraFrame {
            started,
            moved: true,
            finished: true,
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unproject_inverts_project() {
        let mut cam = PlanarCamera::new(400.0, 300.0);
        cam.scale = 2.0;
        cam.offset_x = 15.0;
        cam.offset_y = -5.0;
        let p = Point::new(120.0, 80.0);
        assert_eq!(cam.project(cam.unproject(p)), p);
    }

    #[test]
    fn set_location_at_point_anchors_location() {
        let mut cam = PlanarCamera::new(400.0, 300.0);
        let loc = cam.unproject(Point::new(10.0, 10.0));
        cam.set_location_at_point(loc, Point::new(30.0, 50.0));
        assert_eq!(cam.unproject(Point::new(30.0, 50.0)), loc);
        assert_eq!((cam.offset_x, cam.offset_y), (20.0, 40.0));
    }

    #[test]
    fn pan_by_runs_to_completion() {
        let mut cam = PlanarCamera::new(400.0, 300.0);
        let before = cam.center();
        cam.pan_by(
            Point::new(-60.0, 0.0),
            AnimationOptions {
                duration_ms: 400.0,
                easing: Easing::bezier(0.0, 0.0, 0.3, 1.0),
                no_move_start: true,
            },
            Some(Input::Blur { time: 1.0 }),
        );
        let first = cam.advance(1000.0);
        assert!(!first.started);
        assert!(first.moved && !first.finished);
        let mid = cam.advance(1200.0);
        assert!(!mid.finished);
        let last = cam.advance(1400.0);
        assert!(last.finished);
        assert_eq!(last.origin, Some(Input::Blur { time: 1.0 }));
        let after = cam.center();
        assert!((after.lng - (before.lng - 60.0)).abs() < 1e-9);
        assert_eq!(cam.advance(1500.0), CameraFrame::default());
    }

    #[test]
    fn stop_reports_interrupted_animation() {
        let mut cam = PlanarCamera::new(400.0, 300.0);
        assert!(!cam.stop());
        cam.pan_by(Point::new(10.0, 0.0), AnimationOptions::default(), None);
        assert!(cam.is_easing());
        assert!(cam.stop());
        assert!(!cam.is_easing());
    }

    #[test]
    fn fit_bounds_centers_and_scales() {
        let mut cam = PlanarCamera::new(400.0, 300.0);
        let bounds = LngLatBounds::from_corners(LngLat::new(0.0, 0.0), LngLat::new(100.0, 50.0));
        cam.fit_bounds(
            bounds,
            FitBoundsOptions {
                linear: true,
                duration_ms: 0.0,
                ..FitBoundsOptions::default()
            },
        );
        let frame = cam.advance(5.0);
        assert!(frame.started && frame.finished);
        assert_eq!(cam.scale, 4.0);
        let c = cam.center();
        assert!((c.lng - 50.0).abs() < 1e-9 && (c.lat - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_around_keeps_cursor_location() {
        let mut cam = PlanarCamera::new(400.0, 300.0);
        let cursor = Point::new(100.0, 40.0);
        let before = cam.unproject(cursor);
        cam.zoom_around(2.0, cursor);
        assert_eq!(cam.scale, 2.0);
        let after = cam.unproject(cursor);
        assert!((after.lng - before.lng).abs() < 1e-9);
        assert!((after.lat - before.lat).abs() < 1e-9);
    }
}
