use crate::arbiter::{GestureArbiter, default_handlers};
use crate::camera::Camera;
use crate::context::{EventResponse, MapContext};
use crate::events::{EventType, Evented, ListenerId, MapEvent};
use crate::handler::{GestureHandler, HandlerKind};
use crate::model::RawEvent;
use crate::options::MapOptions;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;

/// An interactive map view: the camera and surface it drives, the event bus
/// and the gesture handlers arbitrating its input.
pub struct Map<C: Camera, S: Surface> {
    camera: C,
    surface: S,
    events: Evented,
    scheduler: FrameScheduler,
    arbiter: GestureArbiter,
    options: MapOptions,
}

impl<C: Camera, S: Surface> std::fmt::Debug for Map<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("arbiter", &self.arbiter)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Splits the map into the borrows a handler call needs.
macro_rules! context {
    ($map:expr, $response:expr) => {
        MapContext {
            camera: &mut $map.camera,
            surface: &mut $map.surface,
            events: &mut $map.events,
            scheduler: &mut $map.scheduler,
            response: $response,
        }
    };
}

impl<C: Camera, S: Surface> Map<C, S> {
    pub fn new(camera: C, surface: S, options: MapOptions) -> Self {
        Self::with_handlers(camera, surface, options, default_handlers())
    }

    /// `handlers` in claim priority order.
    pub fn with_handlers(
        camera: C,
        surface: S,
        options: MapOptions,
        handlers: Vec<Box<dyn GestureHandler>>,
    ) -> Self {
        let mut camera = camera;
        let mut surface = surface;
        let mut events = Evented::new();
        let mut scheduler = FrameScheduler::new();
        let mut response = EventResponse::default();
        let arbiter = {
            let mut cx = MapContext {
                camera: &mut camera,
                surface: &mut surface,
                events: &mut events,
                scheduler: &mut scheduler,
                response: &mut response,
            };
            GestureArbiter::bind(handlers, &options, &mut cx)
        };
        Self {
            camera,
            surface,
            events,
            scheduler,
            arbiter,
            options,
        }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    pub fn on(&mut self, kind: EventType, listener: impl FnMut(&mut MapEvent) + 'static) -> ListenerId {
        self.events.on(kind, listener)
    }

    pub fn once(
        &mut self,
        kind: EventType,
        listener: impl FnMut(&mut MapEvent) + 'static,
    ) -> ListenerId {
        self.events.once(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Feeds one platform event through the arbiter.
    pub fn handle(&mut self, event: RawEvent) -> EventResponse {
        let mut response = EventResponse::default();
        let mut cx = context!(self, &mut response);
        self.arbiter.handle(&mut cx, event);
        response
    }

    /// One animation frame: pending handler callbacks first, then the
    /// camera's own animation.
    pub fn render_frame(&mut self, now: f64) {
        let mut response = EventResponse::default();
        let requested = self.scheduler.take();
        if !requested.is_empty() {
            let mut cx = context!(self, &mut response);
            self.arbiter.run_frame(&mut cx, &requested);
        }

        let frame = self.camera.advance(now);
        if frame.started {
            self.events
                .fire(&mut MapEvent::new(EventType::MoveStart, frame.origin.clone()));
        }
        if frame.moved {
            self.events
                .fire(&mut MapEvent::new(EventType::Move, frame.origin.clone()));
        }
        if frame.finished {
            self.events
                .fire(&mut MapEvent::new(EventType::MoveEnd, frame.origin));
        }
    }

    /// Whether a frame callback is waiting for the next render.
    pub fn needs_frame(&self) -> bool {
        self.scheduler.has_pending()
    }

    pub fn enable(&mut self, kind: HandlerKind) {
        let mut response = EventResponse::default();
        let mut cx = context!(self, &mut response);
        self.arbiter.enable(&mut cx, kind);
        self.options.set_flag(kind, true);
    }

    pub fn disable(&mut self, kind: HandlerKind) {
        let mut response = EventResponse::default();
        let mut cx = context!(self, &mut response);
        self.arbiter.disable(&mut cx, kind);
        self.options.set_flag(kind, false);
    }

    /// Replaces the options, enabling and disabling handlers to match.
    pub fn set_options(&mut self, options: MapOptions) {
        let mut response = EventResponse::default();
        let mut cx = context!(self, &mut response);
        self.arbiter.apply_options(&mut cx, &options);
        self.options = options;
    }

    pub fn is_enabled(&self, kind: HandlerKind) -> bool {
        self.arbiter.is_enabled(kind)
    }

    pub fn is_active(&self, kind: HandlerKind) -> bool {
        self.arbiter.is_active(kind)
    }
}
