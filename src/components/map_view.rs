use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use super::event_log::LoggedEvent;
use crate::camera::Camera;
use crate::dom::{self, DomBinding, WebMap};
use crate::error::{Error, Result};
use crate::events::EventType;
use crate::geo::LngLat;
use crate::options::MapOptions;
use crate::point::Point;
use crate::state::PlanarCamera;

const GRID_WORLD_STEP: f64 = 50.0;
const MIN_GRID_PX: f64 = 24.0;
const MAX_GRID_PX: f64 = 200.0;
const BUTTON_ZOOM: f64 = 2.0;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub options: MapOptions,
    /// Every discrete map event (continuous ones like `move` are skipped).
    pub on_event: Callback<LoggedEvent>,
}

type SharedMap = Rc<RefCell<Option<Rc<RefCell<WebMap>>>>>;

/// Everything the mounted view keeps alive. Dropping it stops the frame loop
/// and detaches the map from the DOM.
struct Mounted {
    window: Window,
    _binding: DomBinding,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // the frame closure holds its own cell; break the cycle
        self.frame.borrow_mut().take();
    }
}

/// World spacing of grid lines so that they stay between
/// `MIN_GRID_PX` and `MAX_GRID_PX` apart on screen.
fn grid_step(scale: f64) -> f64 {
    let mut step = GRID_WORLD_STEP;
    while step * scale < MIN_GRID_PX {
        step *= 2.0;
    }
    while step * scale > MAX_GRID_PX {
        step /= 2.0;
    }
    step
}

fn draw(canvas: &HtmlCanvasElement, camera: &PlanarCamera) -> Result<()> {
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| Error::Js("canvas has no 2d context".into()))?
        .dyn_into()
        .map_err(|_| Error::Js("unexpected 2d context type".into()))?;
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);

    let scale = camera.scale;
    ctx.set_transform(scale, 0.0, 0.0, scale, camera.offset_x, camera.offset_y)?;
    let top_left = camera.unproject(Point::ZERO);
    let bottom_right = camera.unproject(Point::new(w, h));
    let step = grid_step(scale);

    ctx.set_line_width(1.0 / scale);
    ctx.set_stroke_style_str("#21262d");
    ctx.begin_path();
    let mut x = (top_left.lng / step).floor() * step;
    while x <= bottom_right.lng {
        ctx.move_to(x, top_left.lat);
        ctx.line_to(x, bottom_right.lat);
        x += step;
    }
    let mut y = (top_left.lat / step).floor() * step;
    while y <= bottom_right.lat {
        ctx.move_to(top_left.lng, y);
        ctx.line_to(bottom_right.lng, y);
        y += step;
    }
    ctx.stroke();

    ctx.set_fill_style_str("#58a6ff");
    let marker = 6.0 / scale;
    ctx.fill_rect(-marker, -marker, marker * 2.0, marker * 2.0);
    Ok(())
}

// Keeps the canvas backing store and the camera viewport at the element size.
fn sync_size(canvas: &HtmlCanvasElement, map: &mut WebMap) {
    let w = canvas.client_width().max(0) as u32;
    let h = canvas.client_height().max(0) as u32;
    if w != canvas.width() || h != canvas.height() {
        canvas.set_width(w);
        canvas.set_height(h);
        map.camera_mut().resize(w as f64, h as f64);
    }
}

fn mount(
    container: &HtmlElement,
    canvas: HtmlCanvasElement,
    options: MapOptions,
    on_event: Callback<LoggedEvent>,
    shared: &SharedMap,
) -> Result<Mounted> {
    let window = web_sys::window().ok_or(Error::NoWindow)?;
    let (map, binding) = dom::create_map(container, options)?;
    {
        let mut m = map.borrow_mut();
        sync_size(&canvas, &mut m);
        let center = Point::new(m.camera().width * 0.5, m.camera().height * 0.5);
        m.camera_mut().set_location_at_point(LngLat::new(0.0, 0.0), center);
        for kind in EventType::ALL.into_iter().filter(|k| !k.is_continuous()) {
            let on_event = on_event.clone();
            m.on(kind, move |e| on_event.emit(LoggedEvent::from_event(e)));
        }
    }
    *shared.borrow_mut() = Some(map.clone());

    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let raf_id = raf_id.clone();
        let frame_loop = frame.clone();
        let window_loop = window.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Ok(mut m) = map.try_borrow_mut() {
                sync_size(&canvas, &mut m);
                m.render_frame(dom::now());
                if let Err(err) = draw(&canvas, m.camera()) {
                    error!("map draw failed: {err}");
                }
            }
            if let Some(cb) = frame_loop.borrow().as_ref() {
                raf_id.set(window_loop.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(cb) = frame.borrow().as_ref() {
        raf_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
    }
    info!("map view mounted");

    Ok(Mounted {
        window,
        _binding: binding,
        frame,
        raf_id,
    })
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let container_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let shared: SharedMap = use_mut_ref(|| None);

    {
        let container_ref = container_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let options = props.options.clone();
        let on_event = props.on_event.clone();
        let shared = shared.clone();
        use_effect_with((), move |_| {
            let mounted = match (
                container_ref.cast::<HtmlElement>(),
                canvas_ref.cast::<HtmlCanvasElement>(),
            ) {
                (Some(container), Some(canvas)) => {
                    mount(&container, canvas, options, on_event, &shared)
                        .map_err(|err| error!("map view setup failed: {err}"))
                        .ok()
                }
                _ => {
                    error!("map view elements missing");
                    None
                }
            };
            move || {
                drop(mounted);
                shared.borrow_mut().take();
            }
        });
    }
    {
        let shared = shared.clone();
        use_effect_with(props.options.clone(), move |options| {
            if let Some(map) = shared.borrow().as_ref() {
                if let Ok(mut m) = map.try_borrow_mut() {
                    m.set_options(options.clone());
                }
            }
            || ()
        });
    }

    let with_map = |f: fn(&mut WebMap)| {
        let shared = shared.clone();
        Callback::from(move |()| {
            if let Some(map) = shared.borrow().as_ref() {
                if let Ok(mut m) = map.try_borrow_mut() {
                    f(&mut m);
                }
            }
        })
    };
    let zoom_in = with_map(|m| zoom_center(m, BUTTON_ZOOM));
    let zoom_out = with_map(|m| zoom_center(m, 1.0 / BUTTON_ZOOM));
    let reset = with_map(|m| {
        let cam = m.camera_mut();
        cam.stop();
        cam.scale = 1.0;
        cam.jump_to(LngLat::new(0.0, 0.0));
    });

    html! {<div ref={container_ref} style="position:relative; width:100%; height:100%; overflow:hidden; touch-action:none;">
        <canvas ref={canvas_ref} style="display:block; width:100%; height:100%;"></canvas>
        <CameraControls on_zoom_in={zoom_in} on_zoom_out={zoom_out} on_reset={reset} />
    </div>}
}

fn zoom_center(map: &mut WebMap, factor: f64) {
    let cam = map.camera_mut();
    let center = Point::new(cam.width * 0.5, cam.height * 0.5);
    cam.stop();
    cam.zoom_around(factor, center);
}
