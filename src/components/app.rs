use log::warn;
use yew::prelude::*;

use super::event_log::{EventLog, EventLogAction, EventLogState, LoggedEvent};
use super::map_view::MapView;
use super::settings_panel::SettingsPanel;
use crate::options::MapOptions;

#[function_component(App)]
pub fn app() -> Html {
    let options = use_state(MapOptions::load);
    let log = use_reducer(EventLogState::default);

    // Persist option changes
    {
        use_effect_with((*options).clone(), move |options| {
            if let Err(err) = options.save() {
                warn!("could not save map options: {err}");
            }
            || ()
        });
    }

    let on_event = {
        let dispatcher = log.dispatcher();
        Callback::from(move |entry: LoggedEvent| dispatcher.dispatch(EventLogAction::Push(entry)))
    };
    let on_clear = {
        let dispatcher = log.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(EventLogAction::Clear))
    };
    let on_options = {
        let options = options.clone();
        Callback::from(move |next: MapOptions| options.set(next))
    };

    html! {<div style="position:relative; width:100vw; height:100vh; color:#c9d1d9; font-family:sans-serif;">
        <MapView options={(*options).clone()} on_event={on_event} />
        <SettingsPanel options={(*options).clone()} on_change={on_options} />
        <EventLog state={log.clone()} on_clear={on_clear} />
    </div>}
}
