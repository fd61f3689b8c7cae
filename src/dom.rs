//! Browser binding: reads DOM events into [`RawEvent`]s, and implements the
//! surface side effects with real elements and listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, TouchList,
    WheelEvent, Window,
};

use crate::context::EventResponse;
use crate::error::{Error, Result};
use crate::map::Map;
use crate::model::{
    KeyInput, Modifiers, MouseButton, MouseInput, RawEvent, TouchInput, WheelInput,
};
use crate::options::MapOptions;
use crate::point::Point;
use crate::state::PlanarCamera;
use crate::surface::Surface;

pub type WebMap = Map<PlanarCamera, DomSurface>;

/// Delivers a raw event to the map and reports back what to do with the DOM
/// event.
pub type Dispatch = Rc<dyn Fn(RawEvent) -> EventResponse>;

const LINE_HEIGHT_PX: f64 = 40.0;

pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn mouse_pos(el: &Element, client_x: f64, client_y: f64) -> Point {
    let rect = el.get_bounding_client_rect();
    Point::new(
        client_x - rect.left() - el.client_left() as f64,
        client_y - rect.top() - el.client_top() as f64,
    )
}

pub fn mouse_input(el: &Element, e: &MouseEvent) -> MouseInput {
    MouseInput {
        pos: mouse_pos(el, e.client_x() as f64, e.client_y() as f64),
        button: MouseButton::from_dom(e.button()),
        modifiers: Modifiers {
            shift: e.shift_key(),
            ctrl: e.ctrl_key(),
            alt: e.alt_key(),
            meta: e.meta_key(),
        },
        time: e.time_stamp(),
    }
}

fn touch_points(el: &Element, list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| mouse_pos(el, t.client_x() as f64, t.client_y() as f64))
        .collect()
}

pub fn touch_input(el: &Element, e: &TouchEvent) -> TouchInput {
    TouchInput {
        touches: touch_points(el, &e.touches()),
        changed: touch_points(el, &e.changed_touches()),
        time: e.time_stamp(),
    }
}

pub fn wheel_input(el: &Element, e: &WheelEvent) -> WheelInput {
    let delta_y = match e.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => e.delta_y() * LINE_HEIGHT_PX,
        _ => e.delta_y(),
    };
    WheelInput {
        pos: mouse_pos(el, e.client_x() as f64, e.client_y() as f64),
        delta_y,
        time: e.time_stamp(),
    }
}

pub fn key_input(e: &KeyboardEvent) -> KeyInput {
    KeyInput {
        key_code: e.key_code(),
        time: e.time_stamp(),
    }
}

/// DOM-backed [`Surface`]. The key and blur listeners exist for the
/// lifetime of the surface but are only attached while a gesture holds them.
pub struct DomSurface {
    window: Window,
    document: Document,
    container: HtmlElement,
    box_el: Option<HtmlElement>,
    saved_user_select: Option<String>,
    on_key: Closure<dyn FnMut(KeyboardEvent)>,
    on_blur: Closure<dyn FnMut(Event)>,
    key_listening: bool,
    blur_listening: bool,
}

impl DomSurface {
    pub fn new(window: Window, document: Document, container: HtmlElement, dispatch: Dispatch) -> Self {
        let on_key = {
            let dispatch = dispatch.clone();
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                dispatch(RawEvent::KeyDown(key_input(&e)));
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        let on_blur = Closure::wrap(Box::new(move |_e: Event| {
            dispatch(RawEvent::Blur { time: now() });
        }) as Box<dyn FnMut(Event)>);
        Self {
            window,
            document,
            container,
            box_el: None,
            saved_user_select: None,
            on_key,
            on_blur,
            key_listening: false,
            blur_listening: false,
        }
    }

    fn root_style(&self) -> Option<web_sys::CssStyleDeclaration> {
        self.document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| el.style())
    }

    fn create_box_element(&self) -> Result<HtmlElement> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into().map_err(|_| {
            Error::Js("created element is not an HtmlElement".into())
        })?;
        el.set_class_name("map-gestures-boxzoom");
        let style = el.style();
        style.set_property("position", "absolute")?;
        style.set_property("top", "0")?;
        style.set_property("left", "0")?;
        style.set_property("width", "0")?;
        style.set_property("height", "0")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("border", "2px dotted #58a6ff")?;
        style.set_property("background", "rgba(88,166,255,0.12)")?;
        self.container.append_child(&el)?;
        Ok(el)
    }

    fn toggle_listener(
        target: &web_sys::EventTarget,
        name: &str,
        callback: &js_sys::Function,
        on: bool,
    ) -> Result<()> {
        if on {
            target.add_event_listener_with_callback(name, callback)?;
        } else {
            target.remove_event_listener_with_callback(name, callback)?;
        }
        Ok(())
    }
}

impl Surface for DomSurface {
    fn disable_drag(&mut self) {
        let Some(style) = self.root_style() else {
            return;
        };
        self.saved_user_select = style.get_property_value("user-select").ok();
        if let Err(err) = style.set_property("user-select", "none") {
            warn!("could not disable text selection: {err:?}");
        }
    }

    fn enable_drag(&mut self) {
        let Some(style) = self.root_style() else {
            return;
        };
        let restored = match self.saved_user_select.take() {
            Some(prev) if !prev.is_empty() => style.set_property("user-select", &prev),
            _ => style.remove_property("user-select").map(|_| ()),
        };
        if let Err(err) = restored {
            warn!("could not restore text selection: {err:?}");
        }
    }

    fn listen_keys(&mut self, on: bool) {
        if on == self.key_listening {
            return;
        }
        let callback = self.on_key.as_ref().unchecked_ref();
        match Self::toggle_listener(&self.document, "keydown", callback, on) {
            Ok(()) => self.key_listening = on,
            Err(err) => warn!("keydown listener: {err}"),
        }
    }

    fn listen_blur(&mut self, on: bool) {
        if on == self.blur_listening {
            return;
        }
        let callback = self.on_blur.as_ref().unchecked_ref();
        match Self::toggle_listener(&self.window, "blur", callback, on) {
            Ok(()) => self.blur_listening = on,
            Err(err) => warn!("blur listener: {err}"),
        }
    }

    fn create_box(&mut self) {
        if self.box_el.is_some() {
            return;
        }
        match self.create_box_element() {
            Ok(el) => self.box_el = Some(el),
            Err(err) => warn!("could not create box zoom element: {err}"),
        }
    }

    fn set_box(&mut self, min: Point, max: Point) {
        let Some(el) = &self.box_el else {
            return;
        };
        let style = el.style();
        let result = style
            .set_property("transform", &format!("translate({}px,{}px)", min.x, min.y))
            .and_then(|_| style.set_property("width", &format!("{}px", max.x - min.x)))
            .and_then(|_| style.set_property("height", &format!("{}px", max.y - min.y)));
        if let Err(err) = result {
            warn!("could not position box zoom element: {err:?}");
        }
    }

    fn remove_box(&mut self) {
        if let Some(el) = self.box_el.take() {
            el.remove();
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.listen_keys(false);
        self.listen_blur(false);
        self.remove_box();
    }
}

type Convert = fn(&HtmlElement, &Event) -> Option<RawEvent>;

/// Listeners registered on the map container. Dropping the binding removes
/// them.
pub struct DomBinding {
    container: HtmlElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl DomBinding {
    pub fn attach(container: &HtmlElement, dispatch: Dispatch) -> Result<Self> {
        let mut binding = Self {
            container: container.clone(),
            listeners: Vec::new(),
        };
        let table: [(&'static str, Convert); 13] = [
            ("mouseout", |el, e| mouse(el, e).map(RawEvent::MouseOut)),
            ("mousedown", |el, e| mouse(el, e).map(RawEvent::MouseDown)),
            ("mouseup", |el, e| mouse(el, e).map(RawEvent::MouseUp)),
            ("mousemove", |el, e| mouse(el, e).map(RawEvent::MouseMove)),
            ("mouseover", |el, e| mouse(el, e).map(RawEvent::MouseOver)),
            ("touchstart", |el, e| touch(el, e).map(RawEvent::TouchStart)),
            ("touchend", |el, e| touch(el, e).map(RawEvent::TouchEnd)),
            ("touchmove", |el, e| touch(el, e).map(RawEvent::TouchMove)),
            ("touchcancel", |el, e| touch(el, e).map(RawEvent::TouchCancel)),
            ("click", |el, e| mouse(el, e).map(RawEvent::Click)),
            ("dblclick", |el, e| mouse(el, e).map(RawEvent::DblClick)),
            ("contextmenu", |el, e| mouse(el, e).map(RawEvent::ContextMenu)),
            ("wheel", |el, e| {
                e.dyn_ref::<WheelEvent>()
                    .map(|w| RawEvent::Wheel(wheel_input(el, w)))
            }),
        ];
        for (name, convert) in table {
            binding.listen(name, &dispatch, convert)?;
        }
        Ok(binding)
    }

    fn listen(&mut self, name: &'static str, dispatch: &Dispatch, convert: Convert) -> Result<()> {
        let el = self.container.clone();
        let dispatch = dispatch.clone();
        let cb = Closure::wrap(Box::new(move |e: Event| {
            let Some(raw) = convert(&el, &e) else {
                return;
            };
            if dispatch(raw).prevent_default {
                e.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);
        self.container
            .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())?;
        self.listeners.push((name, cb));
        Ok(())
    }
}

impl Drop for DomBinding {
    fn drop(&mut self) {
        for (name, cb) in &self.listeners {
            let _ = self
                .container
                .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
    }
}

fn mouse(el: &HtmlElement, e: &Event) -> Option<MouseInput> {
    e.dyn_ref::<MouseEvent>().map(|m| mouse_input(el, m))
}

fn touch(el: &HtmlElement, e: &Event) -> Option<TouchInput> {
    e.dyn_ref::<TouchEvent>().map(|t| touch_input(el, t))
}

fn dispatcher(map: Weak<RefCell<WebMap>>) -> Dispatch {
    Rc::new(move |raw: RawEvent| {
        let Some(map) = map.upgrade() else {
            return EventResponse::default();
        };
        let Ok(mut map) = map.try_borrow_mut() else {
            warn!("map busy, dropping {raw:?}");
            return EventResponse::default();
        };
        map.handle(raw)
    })
}

/// Builds a map over `container`, sized to it, with its DOM listeners
/// attached. Keep the binding alive as long as the map should react.
pub fn create_map(
    container: &HtmlElement,
    options: MapOptions,
) -> Result<(Rc<RefCell<WebMap>>, DomBinding)> {
    let window = web_sys::window().ok_or(Error::NoWindow)?;
    let document = window.document().ok_or(Error::NoDocument)?;
    let camera = PlanarCamera::new(
        container.client_width() as f64,
        container.client_height() as f64,
    );
    let map = Rc::new_cyclic(|weak: &Weak<RefCell<WebMap>>| {
        let surface = DomSurface::new(window, document, container.clone(), dispatcher(weak.clone()));
        RefCell::new(Map::new(camera, surface, options))
    });
    let binding = DomBinding::attach(container, dispatcher(Rc::downgrade(&map)))?;
    Ok((map, binding))
}
