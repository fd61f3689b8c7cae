//! Interactive gestures for a pannable, zoomable map view.
//!
//! Raw pointer, touch, wheel and keyboard input goes into a [`Map`], whose
//! [`GestureArbiter`](arbiter::GestureArbiter) publishes the canonical map
//! events and hands the input to the gesture handlers in priority order:
//! scroll zoom, box zoom (shift + drag) and drag pan with inertia.
//!
//! The core is DOM-free. [`dom`] binds a map to a browser element and
//! [`components`] hosts it in a yew app.

pub mod arbiter;
pub mod camera;
pub mod components;
pub mod context;
pub mod dom;
pub mod easing;
pub mod error;
pub mod events;
pub mod geo;
pub mod handler;
pub mod map;
pub mod model;
pub mod options;
pub mod point;
pub mod scheduler;
pub mod state;
pub mod surface;

pub use arbiter::GestureArbiter;
pub use camera::{AnimationOptions, Camera, CameraFrame, FitBoundsOptions};
pub use error::{Error, Result};
pub use events::{EventType, ListenerId, MapEvent};
pub use geo::{LngLat, LngLatBounds};
pub use handler::{GestureHandler, HandlerKind};
pub use map::Map;
pub use model::{Input, RawEvent};
pub use options::MapOptions;
pub use point::Point;
pub use state::PlanarCamera;
pub use surface::{HeadlessSurface, Surface};
