//! Single entry point for a surface's raw input. Publishes the canonical
//! event first, then offers the input to the handlers in priority order.

use log::{debug, trace};

use crate::context::MapContext;
use crate::events::{EventType, MapEvent};
use crate::handler::{
    BoxZoomHandler, DragPanHandler, GestureHandler, HandlerKind, ScrollZoomHandler,
};
use crate::model::{Input, KeyInput, MouseInput, RawEvent, TouchInput, WheelInput};
use crate::options::MapOptions;
use crate::state::{ArbiterState, Tap};

/// Owns the handlers of one map, ordered by claim priority.
pub struct GestureArbiter {
    handlers: Vec<Box<dyn GestureHandler>>,
    state: ArbiterState,
}

impl std::fmt::Debug for GestureArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureArbiter")
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.kind()).collect::<Vec<_>>(),
            )
            .field("state", &self.state)
            .finish()
    }
}

/// The built-in handlers: box zoom before drag pan, so a shift-press goes to
/// box zoom. A drag-rotate handler belongs between the two.
pub fn default_handlers() -> Vec<Box<dyn GestureHandler>> {
    vec![
        Box::new(ScrollZoomHandler::new()),
        Box::new(BoxZoomHandler::new()),
        Box::new(DragPanHandler::new()),
    ]
}

impl GestureArbiter {
    /// Takes the handlers in priority order and enables those the options
    /// allow.
    pub fn bind(
        handlers: Vec<Box<dyn GestureHandler>>,
        options: &MapOptions,
        cx: &mut MapContext<'_>,
    ) -> Self {
        let mut arbiter = Self {
            handlers,
            state: ArbiterState::default(),
        };
        arbiter.apply_options(cx, options);
        arbiter
    }

    /// Enables or disables every handler to match `options`.
    pub fn apply_options(&mut self, cx: &mut MapContext<'_>, options: &MapOptions) {
        for handler in self.handlers.iter_mut() {
            if options.handler_enabled(handler.kind()) {
                handler.enable(cx);
            } else {
                handler.disable(cx);
            }
        }
    }

    pub fn state(&self) -> &ArbiterState {
        &self.state
    }

    pub fn handler(&self, kind: HandlerKind) -> Option<&dyn GestureHandler> {
        self.handlers
            .iter()
            .find(|h| h.kind() == kind)
            .map(|h| h.as_ref())
    }

    pub fn handler_mut(&mut self, kind: HandlerKind) -> Option<&mut Box<dyn GestureHandler>> {
        self.handlers.iter_mut().find(|h| h.kind() == kind)
    }

    pub fn is_active(&self, kind: HandlerKind) -> bool {
        self.handler(kind).is_some_and(|h| h.is_active())
    }

    pub fn is_enabled(&self, kind: HandlerKind) -> bool {
        self.handler(kind).is_some_and(|h| h.is_enabled())
    }

    pub fn handle(&mut self, cx: &mut MapContext<'_>, event: RawEvent) {
        match event {
            RawEvent::MouseDown(m) => self.on_mouse_down(cx, m),
            RawEvent::MouseMove(m) => self.on_mouse_move(cx, m),
            RawEvent::MouseUp(m) => self.on_mouse_up(cx, m),
            RawEvent::MouseOver(m) => {
                cx.fire_pointer(EventType::MouseOver, &Input::Mouse(m));
            }
            RawEvent::MouseOut(m) => {
                cx.fire_pointer(EventType::MouseOut, &Input::Mouse(m));
            }
            RawEvent::TouchStart(t) => self.on_touch_start(cx, t),
            RawEvent::TouchMove(t) => self.on_touch_move(cx, t),
            RawEvent::TouchEnd(t) => self.on_touch_end(cx, EventType::TouchEnd, t),
            RawEvent::TouchCancel(t) => self.on_touch_end(cx, EventType::TouchCancel, t),
            RawEvent::Click(m) => self.on_click(cx, m),
            RawEvent::DblClick(m) => {
                cx.prevent_default();
                cx.fire_pointer(EventType::DblClick, &Input::Mouse(m));
            }
            RawEvent::ContextMenu(m) => self.on_context_menu(cx, m),
            RawEvent::Wheel(w) => self.on_wheel(cx, w),
            RawEvent::KeyDown(k) => self.on_key_down(cx, k),
            RawEvent::Blur { time } => {
                for h in self.handlers.iter_mut() {
                    h.on_blur(cx, time);
                }
            }
        }
    }

    /// Runs the frame callbacks requested since the previous frame.
    pub fn run_frame(&mut self, cx: &mut MapContext<'_>, requested: &[HandlerKind]) {
        for h in self.handlers.iter_mut() {
            if requested.contains(&h.kind()) {
                h.on_frame(cx);
            }
        }
    }

    pub fn enable(&mut self, cx: &mut MapContext<'_>, kind: HandlerKind) {
        if let Some(h) = self.handler_mut(kind) {
            h.enable(cx);
        }
    }

    pub fn disable(&mut self, cx: &mut MapContext<'_>, kind: HandlerKind) {
        if let Some(h) = self.handler_mut(kind) {
            h.disable(cx);
        }
    }

    // A handler is offered the press only if no higher-priority handler has
    // claimed the gesture.
    fn offer_down(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        for i in 0..self.handlers.len() {
            if self.handlers[..i].iter().any(|h| h.claims_gesture()) {
                trace!("{:?} not offered the press", self.handlers[i].kind());
                continue;
            }
            self.handlers[i].on_down(cx, input);
        }
    }

    fn forward_move(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        for h in self.handlers.iter_mut() {
            h.on_move(cx, input);
        }
    }

    fn forward_up(&mut self, cx: &mut MapContext<'_>, input: &Input) {
        for h in self.handlers.iter_mut() {
            h.on_up(cx, input);
        }
    }

    fn stop_camera(&mut self, cx: &mut MapContext<'_>) {
        if cx.camera.stop() {
            // an interrupted camera animation still closes its move
            cx.fire(EventType::MoveEnd, None);
        }
    }

    fn prevented(event: &MapEvent) -> bool {
        if event.default_prevented() {
            debug!("{} default prevented, skipping handlers", event.kind);
            return true;
        }
        false
    }

    fn on_mouse_down(&mut self, cx: &mut MapContext<'_>, m: MouseInput) {
        let pos = m.pos;
        let input = Input::Mouse(m);
        let event = cx.fire_pointer(EventType::MouseDown, &input);
        if Self::prevented(&event) {
            return;
        }

        if !self.is_active(HandlerKind::DoubleClickZoom) {
            self.stop_camera(cx);
        }

        self.state.start_pos = Some(pos);
        self.state.mouse_down = true;

        self.offer_down(cx, &input);
    }

    fn on_mouse_move(&mut self, cx: &mut MapContext<'_>, m: MouseInput) {
        let input = Input::Mouse(m);
        let event = cx.fire_pointer(EventType::MouseMove, &input);
        if Self::prevented(&event) {
            return;
        }
        self.forward_move(cx, &input);
    }

    fn on_mouse_up(&mut self, cx: &mut MapContext<'_>, m: MouseInput) {
        let rotating = self.is_active(HandlerKind::DragRotate);

        if let Some(menu) = self.state.context_menu_event.take() {
            if !rotating {
                // contextmenu that arrived with the press is delivered now
                cx.fire_pointer(EventType::ContextMenu, &Input::Mouse(menu));
            }
        }
        self.state.mouse_down = false;

        let input = Input::Mouse(m);
        let event = cx.fire_pointer(EventType::MouseUp, &input);
        if Self::prevented(&event) {
            return;
        }
        self.forward_up(cx, &input);
    }

    fn on_touch_start(&mut self, cx: &mut MapContext<'_>, t: TouchInput) {
        let time = t.time;
        let single = t.touches.len() <= 1;
        let input = Input::Touch(t);
        let event = cx.fire_pointer(EventType::TouchStart, &input);
        if Self::prevented(&event) {
            return;
        }

        self.stop_camera(cx);

        if single && self.state.tapped.tap(time) == Tap::Double {
            debug!("double tap");
            cx.fire_pointer(EventType::DblClick, &input);
        }

        self.offer_down(cx, &input);
    }

    fn on_touch_move(&mut self, cx: &mut MapContext<'_>, t: TouchInput) {
        let input = Input::Touch(t);
        let event = cx.fire_pointer(EventType::TouchMove, &input);
        if Self::prevented(&event) {
            return;
        }
        self.forward_move(cx, &input);
    }

    fn on_touch_end(&mut self, cx: &mut MapContext<'_>, kind: EventType, t: TouchInput) {
        let input = Input::Touch(t);
        let event = cx.fire_pointer(kind, &input);
        if Self::prevented(&event) {
            return;
        }
        self.forward_up(cx, &input);
    }

    fn on_click(&mut self, cx: &mut MapContext<'_>, m: MouseInput) {
        // any movement between press and release, however small, is a drag
        if self.state.start_pos == Some(m.pos) {
            cx.fire_pointer(EventType::Click, &Input::Mouse(m));
        }
    }

    fn on_context_menu(&mut self, cx: &mut MapContext<'_>, m: MouseInput) {
        cx.prevent_default();
        let rotating = self.is_active(HandlerKind::DragRotate);
        if !self.state.mouse_down && !rotating {
            // fired on release: deliver right away
            cx.fire_pointer(EventType::ContextMenu, &Input::Mouse(m));
        } else if self.state.mouse_down {
            // fired on press: hold until the release
            self.state.context_menu_event = Some(m);
        }
    }

    fn on_wheel(&mut self, cx: &mut MapContext<'_>, w: WheelInput) {
        let event = cx.fire_pointer(EventType::Wheel, &Input::Wheel(w.clone()));
        if Self::prevented(&event) {
            return;
        }
        for h in self.handlers.iter_mut() {
            h.on_wheel(cx, &w);
        }
    }

    fn on_key_down(&mut self, cx: &mut MapContext<'_>, k: KeyInput) {
        for h in self.handlers.iter_mut() {
            h.on_key_down(cx, &k);
        }
    }
}
