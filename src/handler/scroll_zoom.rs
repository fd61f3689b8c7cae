use crate::context::MapContext;
use crate::events::EventType;
use crate::handler::{GestureHandler, HandlerKind};
use crate::model::{Input, WheelInput};

const WHEEL_ZOOM_RATE: f64 = 0.001;

/// Zooms around the cursor on mouse wheel input. Each wheel event is applied
/// immediately; there is no pending phase.
#[derive(Debug, Clone, Default)]
pub struct ScrollZoomHandler {
    enabled: bool,
}

impl ScrollZoomHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_factor(delta_y: f64) -> f64 {
        (-delta_y * WHEEL_ZOOM_RATE).exp()
    }
}

impl GestureHandler for ScrollZoomHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::ScrollZoom
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_active(&self) -> bool {
        false
    }

    fn enable(&mut self, _cx: &mut MapContext<'_>) {
        self.enabled = true;
    }

    fn disable(&mut self, _cx: &mut MapContext<'_>) {
        self.enabled = false;
    }

    fn on_wheel(&mut self, cx: &mut MapContext<'_>, wheel: &WheelInput) {
        if !self.enabled || wheel.delta_y == 0.0 {
            return;
        }
        cx.prevent_default();
        cx.camera.zoom_around(Self::zoom_factor(wheel.delta_y), wheel.pos);
        let original = Input::Wheel(wheel.clone());
        cx.fire(EventType::Zoom, Some(&original));
        cx.fire(EventType::Move, Some(&original));
    }
}
