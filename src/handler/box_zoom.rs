use log::debug;

use crate::camera::FitBoundsOptions;
use crate::context::MapContext;
use crate::events::{EventType, MapEvent};
use crate::geo::LngLatBounds;
use crate::handler::{GestureHandler, HandlerKind};
use crate::model::{Input, KEY_ESCAPE, KeyInput, MouseButton};
use crate::point::Point;
use crate::state::{GestureMachine, HandlerState};

/// Zooms the map to fit a box drawn with shift + primary-button drag.
#[derive(Debug, Clone, Default)]
pub struct BoxZoomHandler {
    machine: GestureMachine,
    start_pos: Option<Point>,
}

impl BoxZoomHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HandlerState {
        self.machine.state()
    }

    // Releases the key listener, the box element and text selection.
    fn finish(cx: &mut MapContext<'_>) {
        cx.surface.listen_keys(false);
        cx.surface.remove_box();
        cx.surface.enable_drag();
    }
}

impl GestureHandler for BoxZoomHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::BoxZoom
    }

    fn is_enabled(&self) -> bool {
        self.machine.is_enabled()
    }

    fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    fn claims_gesture(&self) -> bool {
        self.machine.is_engaged()
    }

    fn enable(&mut self, _cx: &mut MapContext<'_>) {
        self.machine.enable();
    }

    fn disable(&mut self, cx: &mut MapContext<'_>) {
        self.machine.disable(|_| Self::finish(cx));
        self.start_pos = None;
    }

    fn on_down(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        let Some(mouse) = input.as_mouse() else {
            return;
        };
        if !self.machine.is_inactive() {
            return;
        }
        if !(mouse.modifiers.shift && mouse.button == MouseButton::Primary) {
            return;
        }

        cx.surface.listen_keys(true);
        cx.surface.disable_drag();

        self.machine.begin();
        self.start_pos = Some(mouse.pos);
        debug!("box zoom pending at {:?}", mouse.pos);
    }

    fn on_move(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        let Some(mouse) = input.as_mouse() else {
            return;
        };
        if !self.machine.is_engaged() {
            return;
        }
        let Some(p0) = self.start_pos else {
            return;
        };
        let p1 = mouse.pos;

        self.machine.activate(|| {
            cx.surface.create_box();
            cx.fire(EventType::BoxZoomStart, Some(input));
        });

        cx.surface.set_box(p0.min(p1), p0.max(p1));
    }

    fn on_up(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        let Some(mouse) = input.as_mouse() else {
            return;
        };
        if !self.machine.is_engaged() {
            return;
        }
        // a secondary-button release leaves the box in progress
        if mouse.button != MouseButton::Primary {
            return;
        }

        Self::finish(cx);
        let start = self.start_pos.take();
        let prev = self.machine.release();

        let (Some(HandlerState::Active), Some(p0)) = (prev, start) else {
            debug!("box zoom released without a box");
            cx.fire(EventType::BoxZoomCancel, Some(input));
            return;
        };

        let p1 = mouse.pos;
        let bounds = LngLatBounds::from_corners(cx.camera.unproject(p0), cx.camera.unproject(p1));

        if p0 == p1 {
            cx.fire(EventType::BoxZoomCancel, Some(input));
        } else {
            debug!("box zoom to {bounds:?}");
            cx.camera.fit_bounds(
                bounds,
                FitBoundsOptions {
                    linear: true,
                    ..FitBoundsOptions::default()
                },
            );
            cx.fire_event(
                MapEvent::new(EventType::BoxZoomEnd, Some(input.clone())).with_bounds(bounds),
            );
        }
    }

    fn on_key_down(&mut self, cx: &mut MapContext<'_>, key: &KeyInput) {
        if key.key_code != KEY_ESCAPE || !self.machine.is_engaged() {
            return;
        }
        Self::finish(cx);
        self.start_pos = None;
        self.machine.release();
        debug!("box zoom cancelled by escape");
        cx.fire(EventType::BoxZoomCancel, Some(&Input::Key(key.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::Harness;
    use crate::model::{MouseInput, TouchInput};

    fn mouse(x: f64, y: f64) -> MouseInput {
        MouseInput::new(Point::new(x, y), 0.0)
    }

    fn shift_down(h: &mut Harness, bz: &mut BoxZoomHandler, x: f64, y: f64) {
        bz.on_down(&mut h.cx(), &Input::Mouse(mouse(x, y).with_shift()));
    }

    fn enabled(h: &mut Harness) -> BoxZoomHandler {
        let mut bz = BoxZoomHandler::new();
        bz.enable(&mut h.cx());
        bz
    }

    #[test]
    fn plain_press_is_ignored() {
        let mut h = Harness::new();
        let mut bz = enabled(&mut h);
        bz.on_down(&mut h.cx(), &Input::Mouse(mouse(1.0, 1.0)));
        assert_eq!(bz.state(), HandlerState::Inactive);
        let secondary = mouse(1.0, 1.0).with_shift().with_button(MouseButton::Secondary);
        bz.on_down(&mut h.cx(), &Input::Mouse(secondary));
        assert_eq!(bz.state(), HandlerState::Inactive);
        bz.on_down(&mut h.cx(), &Input::Touch(TouchInput::single(Point::ZERO, 0.0)));
        assert_eq!(bz.state(), HandlerState::Inactive);
        assert!(h.surface.is_released());
    }

    #[test]
    fn drag_draws_order_independent_box_and_zooms() {
        let mut h = Harness::new();
        let mut bz = enabled(&mut h);
        shift_down(&mut h, &mut bz, 110.0, 60.0);
        assert_eq!(bz.state(), HandlerState::Pending);
        assert!(h.surface.drag_disabled && h.surface.key_listening);
        assert!(bz.claims_gesture() && !bz.is_active());

        bz.on_move(&mut h.cx(), &Input::Mouse(mouse(10.0, 10.0)));
        assert!(bz.is_active());
        assert_eq!(
            h.surface.selection_box,
            Some((Point::new(10.0, 10.0), Point::new(110.0, 60.0)))
        );

        bz.on_up(&mut h.cx(), &Input::Mouse(mouse(10.0, 10.0)));
        assert_eq!(bz.state(), HandlerState::Inactive);
        assert!(h.surface.is_released());
        let (bounds, opts) = h.camera.fitted[0];
        assert!(opts.linear);
        assert_eq!(bounds.sw.lng, 10.0);
        assert_eq!(bounds.ne.lat, 60.0);
        assert_eq!(
            h.fired(),
            vec![EventType::BoxZoomStart, EventType::BoxZoomEnd]
        );
    }

    #[test]
    fn release_without_move_cancels() {
        let mut h = Harness::new();
        let mut bz = enabled(&mut h);
        shift_down(&mut h, &mut bz, 5.0, 5.0);
        bz.on_up(&mut h.cx(), &Input::Mouse(mouse(5.0, 5.0)));
        assert_eq!(h.fired(), vec![EventType::BoxZoomCancel]);
        assert!(h.camera.fitted.is_empty());
        assert!(h.surface.is_released());
    }

    #[test]
    fn secondary_release_keeps_box() {
        let mut h = Harness::new();
        let mut bz = enabled(&mut h);
        shift_down(&mut h, &mut bz, 5.0, 5.0);
        bz.on_move(&mut h.cx(), &Input::Mouse(mouse(20.0, 20.0)));
        let up = mouse(20.0, 20.0).with_button(MouseButton::Secondary);
        bz.on_up(&mut h.cx(), &Input::Mouse(up));
        assert!(bz.is_active());
        assert!(h.surface.box_created);
    }

    #[test]
    fn escape_cancels_and_releases() {
        let mut h = Harness::new();
        let mut bz = enabled(&mut h);
        shift_down(&mut h, &mut bz, 5.0, 5.0);
        bz.on_move(&mut h.cx(), &Input::Mouse(mouse(30.0, 30.0)));
        bz.on_key_down(&mut h.cx(), &KeyInput { key_code: 13, time: 0.0 });
        assert!(bz.is_active());
        bz.on_key_down(&mut h.cx(), &KeyInput { key_code: KEY_ESCAPE, time: 0.0 });
        assert_eq!(bz.state(), HandlerState::Inactive);
        assert!(h.surface.is_released());
        assert_eq!(
            h.fired(),
            vec![EventType::BoxZoomStart, EventType::BoxZoomCancel]
        );
        assert!(h.camera.fitted.is_empty());
    }

    #[test]
    fn disable_mid_gesture_releases_resources() {
        let mut h = Harness::new();
        let mut bz = enabled(&mut h);
        shift_down(&mut h, &mut bz, 5.0, 5.0);
        bz.on_move(&mut h.cx(), &Input::Mouse(mouse(30.0, 30.0)));
        bz.disable(&mut h.cx());
        assert_eq!(bz.state(), HandlerState::Disabled);
        assert!(h.surface.is_released());
    }
}
