//! Gesture handlers and the capability interface the arbiter sees them through.

pub mod box_zoom;
pub mod drag_pan;
pub mod scroll_zoom;

pub use box_zoom::BoxZoomHandler;
pub use drag_pan::DragPanHandler;
pub use scroll_zoom::ScrollZoomHandler;

use crate::context::MapContext;
use crate::model::{Input, KeyInput, WheelInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    ScrollZoom,
    BoxZoom,
    DragRotate,
    DragPan,
    Keyboard,
    DoubleClickZoom,
    TouchZoomRotate,
}

/// A participant in pointer arbitration. Handlers never look at each other's
/// state; the arbiter only asks `is_enabled`, `is_active` and
/// `claims_gesture`.
///
/// Every event method is a no-op unless the handler's own state says
/// otherwise, so the arbiter can forward moves and releases unconditionally.
pub trait GestureHandler {
    fn kind(&self) -> HandlerKind;

    fn is_enabled(&self) -> bool;

    fn is_active(&self) -> bool;

    /// Whether the handler has taken the current gesture, i.e. lower-priority
    /// handlers must not be offered the press. Defaults to `is_active`.
    fn claims_gesture(&self) -> bool {
        self.is_active()
    }

    fn enable(&mut self, cx: &mut MapContext<'_>);

    /// Releases anything an in-progress gesture holds before disabling.
    fn disable(&mut self, cx: &mut MapContext<'_>);

    fn on_down(&mut self, _cx: &mut MapContext<'_>, _input: &Input) {}

    fn on_move(&mut self, _cx: &mut MapContext<'_>, _input: &Input) {}

    fn on_up(&mut self, _cx: &mut MapContext<'_>, _input: &Input) {}

    fn on_key_down(&mut self, _cx: &mut MapContext<'_>, _key: &KeyInput) {}

    fn on_blur(&mut self, _cx: &mut MapContext<'_>, _time: f64) {}

    fn on_wheel(&mut self, _cx: &mut MapContext<'_>, _wheel: &WheelInput) {}

    fn on_frame(&mut self, _cx: &mut MapContext<'_>) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::camera::{AnimationOptions, Camera, CameraFrame, FitBoundsOptions};
    use crate::context::{EventResponse, MapContext};
    use crate::events::{EventType, Evented};
    use crate::geo::{LngLat, LngLatBounds};
    use crate::model::Input;
    use crate::point::Point;
    use crate::scheduler::FrameScheduler;
    use crate::surface::HeadlessSurface;

    #[derive(Default)]
    pub struct RecordingCamera {
        pub offset: Point,
        pub fitted: Vec<(LngLatBounds, FitBoundsOptions)>,
        pub pans: Vec<(Point, AnimationOptions)>,
        pub zooms: Vec<(f64, Point)>,
        pub stops: usize,
    }

    impl Camera for RecordingCamera {
        fn unproject(&self, point: Point) -> LngLat {
            LngLat::new(point.x - self.offset.x, point.y - self.offset.y)
        }

        fn set_location_at_point(&mut self, loc: LngLat, point: Point) {
            self.offset = Point::new(point.x - loc.lng, point.y - loc.lat);
        }

        fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitBoundsOptions) {
            self.fitted.push((bounds, options));
        }

        fn pan_by(&mut self, offset: Point, options: AnimationOptions, _origin: Option<Input>) {
            self.pans.push((offset, options));
        }

        fn zoom_around(&mut self, factor: f64, around: Point) {
            self.zooms.push((factor, around));
        }

        fn stop(&mut self) -> bool {
            self.stops += 1;
            false
        }

        fn advance(&mut self, _now: f64) -> CameraFrame {
            CameraFrame::default()
        }
    }

    #[derive(Default)]
    pub struct Harness {
        pub camera: RecordingCamera,
        pub surface: HeadlessSurface,
        pub events: Evented,
        pub scheduler: FrameScheduler,
        pub response: EventResponse,
        pub fired: Rc<RefCell<Vec<EventType>>>,
    }

    impl Harness {
        pub fn new() -> Self {
            let mut h = Self::default();
            for kind in EventType::ALL {
                let fired = h.fired.clone();
                h.events.on(kind, move |e| fired.borrow_mut().push(e.kind));
            }
            h
        }

        pub fn cx(&mut self) -> MapContext<'_> {
            MapContext {
                camera: &mut self.camera,
                surface: &mut self.surface,
                events: &mut self.events,
                scheduler: &mut self.scheduler,
                response: &mut self.response,
            }
        }

        pub fn fired(&self) -> Vec<EventType> {
            self.fired.borrow().clone()
        }
    }
}
