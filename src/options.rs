use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::handler::HandlerKind;

pub const STORAGE_KEY: &str = "map_gestures_options";

/// Which interactions a map starts with. A handler is enabled only when both
/// `interactive` and its own flag are set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    pub interactive: bool,
    pub scroll_zoom: bool,
    pub box_zoom: bool,
    pub drag_rotate: bool,
    pub drag_pan: bool,
    pub keyboard: bool,
    pub double_click_zoom: bool,
    pub touch_zoom_rotate: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            interactive: true,
            scroll_zoom: true,
            box_zoom: true,
            drag_rotate: true,
            drag_pan: true,
            keyboard: true,
            double_click_zoom: true,
            touch_zoom_rotate: true,
        }
    }
}

impl MapOptions {
    pub fn flag(&self, kind: HandlerKind) -> bool {
        match kind {
            HandlerKind::ScrollZoom => self.scroll_zoom,
            HandlerKind::BoxZoom => self.box_zoom,
            HandlerKind::DragRotate => self.drag_rotate,
            HandlerKind::DragPan => self.drag_pan,
            HandlerKind::Keyboard => self.keyboard,
            HandlerKind::DoubleClickZoom => self.double_click_zoom,
            HandlerKind::TouchZoomRotate => self.touch_zoom_rotate,
        }
    }

    pub fn set_flag(&mut self, kind: HandlerKind, on: bool) {
        let slot = match kind {
            HandlerKind::ScrollZoom => &mut self.scroll_zoom,
            HandlerKind::BoxZoom => &mut self.box_zoom,
            HandlerKind::DragRotate => &mut self.drag_rotate,
            HandlerKind::DragPan => &mut self.drag_pan,
            HandlerKind::Keyboard => &mut self.keyboard,
            HandlerKind::DoubleClickZoom => &mut self.double_click_zoom,
            HandlerKind::TouchZoomRotate => &mut self.touch_zoom_rotate,
        };
        *slot = on;
    }

    pub fn handler_enabled(&self, kind: HandlerKind) -> bool {
        self.interactive && self.flag(kind)
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Options persisted in `localStorage`, or the defaults when nothing
    /// usable is stored.
    pub fn load() -> Self {
        let Some(store) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return Self::default();
        };
        match store.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring stored map options: {err}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let store = window.local_storage()?.ok_or(Error::NoStorage)?;
        store.set_item(STORAGE_KEY, &self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_gates_every_handler() {
        let opts = MapOptions {
            interactive: false,
            ..MapOptions::default()
        };
        assert!(!opts.handler_enabled(HandlerKind::DragPan));
        assert!(MapOptions::default().handler_enabled(HandlerKind::DragPan));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let opts = MapOptions::from_json(r#"{"boxZoom": false}"#).expect("parse");
        assert!(!opts.box_zoom);
        assert!(opts.drag_pan && opts.interactive);
    }

    #[test]
    fn json_uses_camel_case() {
        let mut opts = MapOptions::default();
        opts.set_flag(HandlerKind::DoubleClickZoom, false);
        let json = opts.to_json().expect("serialize");
        assert!(json.contains("\"doubleClickZoom\":false"));
        assert_eq!(MapOptions::from_json(&json).expect("parse"), opts);
    }

    #[test]
    fn garbage_is_an_options_error() {
        assert!(matches!(
            MapOptions::from_json("not json"),
            Err(Error::Options(_))
        ));
    }
}
