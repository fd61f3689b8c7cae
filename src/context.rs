use crate::camera::Camera;
use crate::events::{EventType, Evented, MapEvent};
use crate::handler::HandlerKind;
use crate::model::Input;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
}

/// Everything a handler may touch while processing one event or frame.
pub struct MapContext<'a> {
    pub camera: &'a mut dyn Camera,
    pub surface: &'a mut dyn Surface,
    pub events: &'a mut Evented,
    pub scheduler: &'a mut FrameScheduler,
    pub response: &'a mut EventResponse,
}

impl MapContext<'_> {
    /// Publishes `event` and hands it back so the caller can check
    /// `default_prevented`.
    pub fn fire_event(&mut self, mut event: MapEvent) -> MapEvent {
        self.events.fire(&mut event);
        event
    }

    pub fn fire(&mut self, kind: EventType, original: Option<&Input>) -> MapEvent {
        self.fire_event(MapEvent::new(kind, original.cloned()))
    }

    pub fn fire_pointer(&mut self, kind: EventType, input: &Input) -> MapEvent {
        let event = MapEvent::pointer(kind, input.clone(), &*self.camera);
        self.fire_event(event)
    }

    pub fn request_frame(&mut self, kind: HandlerKind) {
        self.scheduler.request(kind);
    }

    pub fn prevent_default(&mut self) {
        self.response.prevent_default = true;
    }
}
