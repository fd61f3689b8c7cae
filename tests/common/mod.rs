#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use map_gestures::camera::{AnimationOptions, Camera, CameraFrame, FitBoundsOptions};
use map_gestures::context::MapContext;
use map_gestures::geo::{LngLat, LngLatBounds};
use map_gestures::handler::{GestureHandler, HandlerKind};
use map_gestures::model::{Input, MouseButton, MouseInput, RawEvent};
use map_gestures::{EventType, HeadlessSurface, Map, MapOptions, PlanarCamera, Point};

/// A planar camera (identity at rest) that also records the commands it got.
#[derive(Debug, Default)]
pub struct TrackingCamera {
    pub inner: PlanarCamera,
    pub fitted: Vec<(LngLatBounds, FitBoundsOptions)>,
    pub pans: Vec<(Point, AnimationOptions)>,
    pub stops: usize,
}

impl Camera for TrackingCamera {
    fn unproject(&self, point: Point) -> LngLat {
        self.inner.unproject(point)
    }

    fn set_location_at_point(&mut self, loc: LngLat, point: Point) {
        self.inner.set_location_at_point(loc, point);
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitBoundsOptions) {
        self.fitted.push((bounds, options));
        self.inner.fit_bounds(bounds, options);
    }

    fn pan_by(&mut self, offset: Point, options: AnimationOptions, origin: Option<Input>) {
        self.pans.push((offset, options));
        self.inner.pan_by(offset, options, origin);
    }

    fn zoom_around(&mut self, factor: f64, around: Point) {
        self.inner.zoom_around(factor, around);
    }

    fn stop(&mut self) -> bool {
        self.stops += 1;
        self.inner.stop()
    }

    fn advance(&mut self, now: f64) -> CameraFrame {
        self.inner.advance(now)
    }
}

/// Secondary-button drag stand-in, enough for the arbiter's rotate checks.
#[derive(Debug, Default)]
pub struct StubRotate {
    enabled: bool,
    active: bool,
}

impl GestureHandler for StubRotate {
    fn kind(&self) -> HandlerKind {
        HandlerKind::DragRotate
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn enable(&mut self, _cx: &mut MapContext<'_>) {
        self.enabled = true;
    }

    fn disable(&mut self, _cx: &mut MapContext<'_>) {
        self.enabled = false;
        self.active = false;
    }

    fn on_down(&mut self, _cx: &mut MapContext<'_>, input: &Input) {
        if let Some(m) = input.as_mouse() {
            self.active = self.enabled && m.button == MouseButton::Secondary;
        }
    }

    fn on_up(&mut self, _cx: &mut MapContext<'_>, input: &Input) {
        if input.as_mouse().is_some() {
            self.active = false;
        }
    }
}

pub type TestMap = Map<TrackingCamera, HeadlessSurface>;

pub fn map() -> TestMap {
    Map::new(TrackingCamera::default(), HeadlessSurface::new(), MapOptions::default())
}

/// Records every event the map fires, in order.
pub fn record(map: &mut TestMap) -> Rc<RefCell<Vec<EventType>>> {
    let fired = Rc::new(RefCell::new(Vec::new()));
    for kind in EventType::ALL {
        let fired = fired.clone();
        map.on(kind, move |e| fired.borrow_mut().push(e.kind));
    }
    fired
}

pub fn count(fired: &Rc<RefCell<Vec<EventType>>>, kind: EventType) -> usize {
    fired.borrow().iter().filter(|k| **k == kind).count()
}

pub fn mouse(x: f64, y: f64, time: f64) -> MouseInput {
    MouseInput::new(Point::new(x, y), time)
}

/// Renders frames every 16ms from `from` until nothing is left to animate.
pub fn settle(map: &mut TestMap, from: f64) -> f64 {
    let mut now = from;
    for _ in 0..500 {
        map.render_frame(now);
        if !map.needs_frame() && !map.camera().inner.is_easing() {
            break;
        }
        now += 16.0;
    }
    now
}

/// Press, `moves` moves 10px apart, release at the last position.
pub fn drag(map: &mut TestMap, moves: usize) -> Point {
    let mut x = 10.0;
    let mut t = 0.0;
    map.handle(RawEvent::MouseDown(mouse(x, 10.0, t)));
    for _ in 0..moves {
        x += 10.0;
        t += 10.0;
        map.handle(RawEvent::MouseMove(mouse(x, 10.0, t)));
        map.render_frame(t);
    }
    t += 10.0;
    map.handle(RawEvent::MouseUp(mouse(x, 10.0, t)));
    map.handle(RawEvent::Click(mouse(x, 10.0, t)));
    settle(map, t);
    Point::new(x, 10.0)
}
