use crate::model::MouseInput;
use crate::point::Point;

pub const DOUBLE_TAP_MS: f64 = 300.0;

/// Single-tap window for synthesizing `dblclick` from touches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TapTimer {
    deadline: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
    Armed,
    Double,
}

impl TapTimer {
    pub fn tap(&mut self, now: f64) -> Tap {
        match self.deadline.take() {
            Some(deadline) if now < deadline => Tap::Double,
            _ => {
                self.deadline = Some(now + DOUBLE_TAP_MS);
                Tap::Armed
            }
        }
    }

}

#[derive(Debug, Clone, Default)]
pub struct ArbiterState {
    /// `contextmenu` seen while a button was held, replayed on mouseup.
    /// One slot, never a queue.
    pub context_menu_event: Option<MouseInput>,
    pub mouse_down: bool,
    pub start_pos: Option<Point>,
    pub tapped: TapTimer,
}
