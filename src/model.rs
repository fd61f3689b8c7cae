//! Raw input records, decoupled from the DOM event objects they are read from.
//! Positions are element-local pixels, times are milliseconds on the same
//! clock as `performance.now()`.

use serde::{Deserialize, Serialize};

use crate::point::Point;

pub const KEY_ESCAPE: u32 = 27;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl MouseButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => MouseButton::Primary,
            1 => MouseButton::Middle,
            2 => MouseButton::Secondary,
            n => MouseButton::Other(n),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    pub pos: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub time: f64,
}

impl MouseInput {
    pub fn new(pos: Point, time: f64) -> Self {
        Self {
            pos,
            button: MouseButton::Primary,
            modifiers: Modifiers::default(),
            time,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    pub touches: Vec<Point>,
    /// Touch points that changed in this event (the lifted ones on `touchend`).
    pub changed: Vec<Point>,
    pub time: f64,
}

impl TouchInput {
    pub fn single(pos: Point, time: f64) -> Self {
        Self {
            touches: vec![pos],
            changed: vec![pos],
            time,
        }
    }

    pub fn ended(pos: Point, time: f64) -> Self {
        Self {
            touches: Vec::new(),
            changed: vec![pos],
            time,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub pos: Point,
    pub delta_y: f64,
    pub time: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key_code: u32,
    pub time: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Input {
    Mouse(MouseInput),
    Touch(TouchInput),
    Wheel(WheelInput),
    Key(KeyInput),
    Blur { time: f64 },
}

impl Input {
    pub fn time(&self) -> f64 {
        match self {
            Input::Mouse(m) => m.time,
            Input::Touch(t) => t.time,
            Input::Wheel(w) => w.time,
            Input::Key(k) => k.time,
            Input::Blur { time } => *time,
        }
    }

    pub fn pos(&self) -> Option<Point> {
        match self {
            Input::Mouse(m) => Some(m.pos),
            Input::Touch(t) => t.touches.first().or(t.changed.first()).copied(),
            Input::Wheel(w) => Some(w.pos),
            Input::Key(_) | Input::Blur { .. } => None,
        }
    }

    /// All pointer positions, averaged into `point` for canonical events.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Input::Touch(t) if !t.touches.is_empty() => t.touches.clone(),
            Input::Touch(t) => t.changed.clone(),
            other => other.pos().into_iter().collect(),
        }
    }

    pub fn as_mouse(&self) -> Option<&MouseInput> {
        match self {
            Input::Mouse(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent {
    MouseDown(MouseInput),
    MouseUp(MouseInput),
    MouseMove(MouseInput),
    MouseOver(MouseInput),
    MouseOut(MouseInput),
    TouchStart(TouchInput),
    TouchMove(TouchInput),
    TouchEnd(TouchInput),
    TouchCancel(TouchInput),
    Click(MouseInput),
    DblClick(MouseInput),
    ContextMenu(MouseInput),
    Wheel(WheelInput),
    KeyDown(KeyInput),
    Blur { time: f64 },
}
