pub mod arbiter;
pub mod camera;
pub mod inertia;
pub mod machine;

pub use arbiter::{ArbiterState, Tap, TapTimer};
pub use camera::PlanarCamera;
pub use inertia::{Fling, InertiaBuffer, InertiaSample, inertia_easing};
pub use machine::{GestureMachine, HandlerState};
