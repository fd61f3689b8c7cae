use std::collections::VecDeque;
use std::rc::Rc;

use yew::prelude::*;

use crate::events::{EventType, MapEvent};
use crate::geo::LngLatBounds;
use crate::point::Point;

const MAX_ENTRIES: usize = 40;

#[derive(Clone, Debug, PartialEq)]
pub struct LoggedEvent {
    pub kind: EventType,
    pub point: Option<Point>,
    pub bounds: Option<LngLatBounds>,
}

impl LoggedEvent {
    pub fn from_event(event: &MapEvent) -> Self {
        Self {
            kind: event.kind,
            point: event.point,
            bounds: event.box_zoom_bounds,
        }
    }

    fn describe(&self) -> String {
        let mut line = self.kind.to_string();
        if let Some(p) = self.point {
            line.push_str(&format!(" @ {:.0},{:.0}", p.x, p.y));
        }
        if let Some(b) = self.bounds {
            line.push_str(&format!(
                " [{:.1},{:.1} .. {:.1},{:.1}]",
                b.sw.lng, b.sw.lat, b.ne.lng, b.ne.lat
            ));
        }
        line
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLogState {
    pub entries: VecDeque<(u64, LoggedEvent)>,
    next_seq: u64,
}

pub enum EventLogAction {
    Push(LoggedEvent),
    Clear,
}

impl Reducible for EventLogState {
    type Action = EventLogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            EventLogAction::Push(entry) => {
                new.entries.push_front((new.next_seq, entry));
                new.entries.truncate(MAX_ENTRIES);
                new.next_seq += 1;
            }
            EventLogAction::Clear => new.entries.clear(),
        }
        Rc::new(new)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct EventLogProps {
    pub state: UseReducerHandle<EventLogState>,
    pub on_clear: Callback<()>,
}

#[function_component(EventLog)]
pub fn event_log(props: &EventLogProps) -> Html {
    let clear = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; right:12px; top:12px; width:300px; max-height:60vh; overflow:auto; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; font:12px monospace;">
        <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:6px;">
            <strong>{"Events"}</strong>
            <button onclick={clear} style="padding:2px 6px;">{"Clear"}</button>
        </div>
        { for props.state.entries.iter().map(|(seq, entry)| html! {
            <div key={*seq}>{ entry.describe() }</div>
        }) }
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: EventType) -> LoggedEvent {
        LoggedEvent {
            kind,
            point: Some(Point::new(3.0, 4.0)),
            bounds: None,
        }
    }

    #[test]
    fn newest_first_and_capped() {
        let mut state = Rc::new(EventLogState::default());
        for _ in 0..MAX_ENTRIES + 5 {
            state = state.reduce(EventLogAction::Push(entry(EventType::Click)));
        }
        state = state.reduce(EventLogAction::Push(entry(EventType::DragEnd)));
        assert_eq!(state.entries.len(), MAX_ENTRIES);
        assert_eq!(state.entries[0].1.kind, EventType::DragEnd);
        assert_eq!(state.entries[0].0, (MAX_ENTRIES + 5) as u64);
    }

    #[test]
    fn describe_includes_point() {
        assert_eq!(entry(EventType::Click).describe(), "click @ 3,4");
    }
}
