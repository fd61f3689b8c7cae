//! Named map events and the bus external listeners subscribe to.

use std::fmt;

use crate::camera::Camera;
use crate::geo::{LngLat, LngLatBounds};
use crate::model::Input;
use crate::point::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOver,
    MouseOut,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    Click,
    DblClick,
    ContextMenu,
    Wheel,
    BoxZoomStart,
    BoxZoomEnd,
    BoxZoomCancel,
    DragStart,
    Drag,
    DragEnd,
    MoveStart,
    Move,
    MoveEnd,
    Zoom,
}

impl EventType {
    pub const ALL: [EventType; 23] = [
        EventType::MouseDown,
        EventType::MouseUp,
        EventType::MouseMove,
        EventType::MouseOver,
        EventType::MouseOut,
        EventType::TouchStart,
        EventType::TouchMove,
        EventType::TouchEnd,
        EventType::TouchCancel,
        EventType::Click,
        EventType::DblClick,
        EventType::ContextMenu,
        EventType::Wheel,
        EventType::BoxZoomStart,
        EventType::BoxZoomEnd,
        EventType::BoxZoomCancel,
        EventType::DragStart,
        EventType::Drag,
        EventType::DragEnd,
        EventType::MoveStart,
        EventType::Move,
        EventType::MoveEnd,
        EventType::Zoom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::MouseMove => "mousemove",
            EventType::MouseOver => "mouseover",
            EventType::MouseOut => "mouseout",
            EventType::TouchStart => "touchstart",
            EventType::TouchMove => "touchmove",
            EventType::TouchEnd => "touchend",
            EventType::TouchCancel => "touchcancel",
            EventType::Click => "click",
            EventType::DblClick => "dblclick",
            EventType::ContextMenu => "contextmenu",
            EventType::Wheel => "wheel",
            EventType::BoxZoomStart => "boxzoomstart",
            EventType::BoxZoomEnd => "boxzoomend",
            EventType::BoxZoomCancel => "boxzoomcancel",
            EventType::DragStart => "dragstart",
            EventType::Drag => "drag",
            EventType::DragEnd => "dragend",
            EventType::MoveStart => "movestart",
            EventType::Move => "move",
            EventType::MoveEnd => "moveend",
            EventType::Zoom => "zoom",
        }
    }

    /// High-frequency events that a log view usually filters out.
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            EventType::MouseMove | EventType::TouchMove | EventType::Drag | EventType::Move
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cancellable event published on the map's bus. Pointer events carry the
/// element-local point and the location under it.
#[derive(Clone, Debug, PartialEq)]
pub struct MapEvent {
    pub kind: EventType,
    pub original: Option<Input>,
    pub point: Option<Point>,
    pub points: Vec<Point>,
    pub lng_lat: Option<LngLat>,
    pub box_zoom_bounds: Option<LngLatBounds>,
    default_prevented: bool,
}

impl MapEvent {
    pub fn new(kind: EventType, original: Option<Input>) -> Self {
        Self {
            kind,
            original,
            point: None,
            points: Vec::new(),
            lng_lat: None,
            box_zoom_bounds: None,
            default_prevented: false,
        }
    }

    /// Mouse and touch events: `point` is the centroid of the touch points.
    pub fn pointer(kind: EventType, input: Input, camera: &dyn Camera) -> Self {
        let points = input.points();
        let point = centroid(&points);
        let lng_lat = point.map(|p| camera.unproject(p));
        Self {
            point,
            points,
            lng_lat,
            ..Self::new(kind, Some(input))
        }
    }

    pub fn with_bounds(mut self, bounds: LngLatBounds) -> Self {
        self.box_zoom_bounds = Some(bounds);
        self
    }

    /// Cancels the built-in gesture behaviour that would follow this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::ZERO, |acc, p| acc + *p);
    Some(sum * (1.0 / points.len() as f64))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&mut MapEvent)>;

struct Listener {
    id: ListenerId,
    kind: EventType,
    once: bool,
    callback: Callback,
}

/// Observer registry for [`MapEvent`]s. Listeners run in registration order.
#[derive(Default)]
pub struct Evented {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl fmt::Debug for Evented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evented")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Evented {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventType, callback: impl FnMut(&mut MapEvent) + 'static) -> ListenerId {
        self.add(kind, false, Box::new(callback))
    }

    pub fn once(
        &mut self,
        kind: EventType,
        callback: impl FnMut(&mut MapEvent) + 'static,
    ) -> ListenerId {
        self.add(kind, true, Box::new(callback))
    }

    fn add(&mut self, kind: EventType, once: bool, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            once,
            callback,
        });
        id
    }

    /// Returns whether a listener was removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn listens(&self, kind: EventType) -> bool {
        self.listeners.iter().any(|l| l.kind == kind)
    }

    pub fn fire(&mut self, event: &mut MapEvent) {
        let kind = event.kind;
        let mut fired_once = Vec::new();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(event);
            if listener.once {
                fired_once.push(listener.id);
            }
        }
        if !fired_once.is_empty() {
            self.listeners.retain(|l| !fired_once.contains(&l.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_receive_matching_events_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = Evented::new();
        {
            let seen = seen.clone();
            bus.on(EventType::Click, move |e| seen.borrow_mut().push(e.kind));
        }
        bus.fire(&mut MapEvent::new(EventType::DblClick, None));
        bus.fire(&mut MapEvent::new(EventType::Click, None));
        assert_eq!(*seen.borrow(), vec![EventType::Click]);
    }

    #[test]
    fn once_listener_is_removed_after_firing() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = Evented::new();
        {
            let count = count.clone();
            bus.once(EventType::MoveEnd, move |_| *count.borrow_mut() += 1);
        }
        bus.fire(&mut MapEvent::new(EventType::MoveEnd, None));
        bus.fire(&mut MapEvent::new(EventType::MoveEnd, None));
        assert_eq!(*count.borrow(), 1);
        assert!(!bus.listens(EventType::MoveEnd));
    }

    #[test]
    fn off_and_prevent_default() {
        let mut bus = Evented::new();
        let id = bus.on(EventType::MouseDown, |e| e.prevent_default());
        let mut ev = MapEvent::new(EventType::MouseDown, None);
        bus.fire(&mut ev);
        assert!(ev.default_prevented());

        assert!(bus.off(id));
        assert!(!bus.off(id));
        let mut ev = MapEvent::new(EventType::MouseDown, None);
        bus.fire(&mut ev);
        assert!(!ev.default_prevented());
    }

    #[test]
    fn later_listeners_see_earlier_mutations() {
        let seen = Rc::new(RefCell::new(None));
        let mut bus = Evented::new();
        bus.once(EventType::Click, |e| {
            e.point = Some(Point::new(4.0, 2.0));
            e.prevent_default();
        });
        {
            let seen = seen.clone();
            bus.on(EventType::Click, move |e| {
                *seen.borrow_mut() = Some((e.point, e.default_prevented()));
            });
        }
        let mut ev = MapEvent::new(EventType::Click, None);
        bus.fire(&mut ev);
        assert_eq!(*seen.borrow(), Some((Some(Point::new(4.0, 2.0)), true)));
        assert!(ev.default_prevented());

        // the once listener is gone, the other still runs
        let mut ev = MapEvent::new(EventType::Click, None);
        bus.fire(&mut ev);
        assert_eq!(*seen.borrow(), Some((None, false)));
    }

    #[test]
    fn names_match_dom_spelling() {
        assert_eq!(EventType::BoxZoomCancel.to_string(), "boxzoomcancel");
        assert_eq!(EventType::DblClick.as_str(), "dblclick");
    }
}
