//! Side effects on the interactive surface that handlers acquire at gesture
//! start and release on every exit path.

use crate::point::Point;

pub trait Surface {
    fn disable_drag(&mut self);
    fn enable_drag(&mut self);

    fn listen_keys(&mut self, on: bool);

    /// Window blur subscription, so a release outside the window still ends
    /// a drag.
    fn listen_blur(&mut self, on: bool);

    fn create_box(&mut self);
    /// Positions the selection box; `min`/`max` are element-local corners.
    fn set_box(&mut self, min: Point, max: Point);
    fn remove_box(&mut self);
}

/// Surface without a DOM. Keeps the acquisition state so hosts and tests can
/// check that nothing leaks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessSurface {
    pub drag_disabled: bool,
    pub key_listening: bool,
    pub blur_listening: bool,
    pub selection_box: Option<(Point, Point)>,
    pub box_created: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_released(&self) -> bool {
        !self.drag_disabled && !self.key_listening && !self.blur_listening && !self.box_created
    }
}

impl Surface for HeadlessSurface {
    fn disable_drag(&mut self) {
        self.drag_disabled = true;
    }

    fn enable_drag(&mut self) {
        self.drag_disabled = false;
    }

    fn listen_keys(&mut self, on: bool) {
        self.key_listening = on;
    }

    fn listen_blur(&mut self, on: bool) {
        self.blur_listening = on;
    }

    fn create_box(&mut self) {
        self.box_created = true;
    }

    fn set_box(&mut self, min: Point, max: Point) {
        self.selection_box = Some((min, max));
    }

    fn remove_box(&mut self) {
        self.box_created = false;
        self.selection_box = None;
    }
}
