use log::{debug, trace};

use crate::camera::AnimationOptions;
use crate::context::MapContext;
use crate::events::EventType;
use crate::handler::{GestureHandler, HandlerKind};
use crate::model::{Input, MouseButton};
use crate::point::Point;
use crate::state::{GestureMachine, HandlerState, InertiaBuffer, inertia_easing};

/// Pans the map while the pointer is dragged, then flings it on release.
///
/// The drag starts on the first move, not on the press, so a press and
/// release in place stays a click. Camera updates happen in the frame
/// callback; input handling only records positions.
#[derive(Debug, Clone, Default)]
pub struct DragPanHandler {
    machine: GestureMachine,
    pos: Option<Point>,
    previous_pos: Option<Point>,
    inertia: InertiaBuffer,
    last_move: Option<Input>,
}

impl DragPanHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HandlerState {
        self.machine.state()
    }

    fn reset_positions(&mut self) {
        self.pos = None;
        self.previous_pos = None;
        self.last_move = None;
    }
}

impl GestureHandler for DragPanHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::DragPan
    }

    fn is_enabled(&self) -> bool {
        self.machine.is_enabled()
    }

    fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    fn enable(&mut self, _cx: &mut MapContext<'_>) {
        self.machine.enable();
    }

    fn disable(&mut self, cx: &mut MapContext<'_>) {
        self.machine.disable(|_| cx.surface.listen_blur(false));
        self.reset_positions();
    }

    fn on_down(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        if !self.machine.is_inactive() {
            return;
        }
        match input {
            Input::Touch(t) if t.touches.len() > 1 => return,
            Input::Touch(_) => {}
            Input::Mouse(m) if m.modifiers.ctrl || m.button != MouseButton::Primary => return,
            Input::Mouse(_) => {}
            _ => return,
        }
        let Some(pos) = input.pos() else {
            return;
        };

        cx.surface.listen_blur(true);

        self.machine.begin();
        self.previous_pos = Some(pos);
        self.inertia.reset(input.time(), pos);
        trace!("drag pan pending at {pos:?}");
    }

    fn on_move(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        if !self.machine.is_engaged() {
            return;
        }
        let Some(pos) = input.pos() else {
            return;
        };

        self.last_move = Some(input.clone());
        cx.prevent_default();

        self.pos = Some(pos);
        self.inertia.push(input.time(), pos);

        self.machine.activate(|| {
            debug!("drag pan active");
            cx.fire(EventType::DragStart, Some(input));
            cx.fire(EventType::MoveStart, Some(input));
        });

        cx.request_frame(HandlerKind::DragPan);
    }

    fn on_frame(&mut self, cx: &mut MapContext<'_>) {
        let Some(e) = self.last_move.take() else {
            return;
        };
        let (Some(previous), Some(pos)) = (self.previous_pos, self.pos) else {
            return;
        };

        let loc = cx.camera.point_location(previous);
        cx.camera.set_location_at_point(loc, pos);
        cx.fire(EventType::Drag, Some(&e));
        cx.fire(EventType::Move, Some(&e));

        self.previous_pos = Some(pos);
    }

    fn on_up(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        if !self.machine.is_engaged() {
            return;
        }
        if let Input::Mouse(m) = input {
            if m.button != MouseButton::Primary {
                return;
            }
        }

        cx.surface.listen_blur(false);

        if self.machine.release() != Some(HandlerState::Active) {
            return;
        }
        self.reset_positions();

        cx.fire(EventType::DragEnd, Some(input));
        self.inertia.drain(input.time());

        let Some(fling) = self.inertia.fling() else {
            cx.fire(EventType::MoveEnd, Some(input));
            return;
        };

        debug!(
            "drag pan fling: speed {:.0}px/s over {:.0}ms",
            fling.speed, fling.duration_ms
        );
        cx.camera.pan_by(
            fling.offset,
            AnimationOptions {
                duration_ms: fling.duration_ms,
                easing: inertia_easing(),
                no_move_start: true,
            },
            Some(input.clone()),
        );
    }

    fn on_blur(&mut self, cx: &mut MapContext<'_>, time: f64) {
        self.on_up(cx, &Input::Blur { time });
    }
}
