use yew::prelude::*;

use crate::handler::HandlerKind;
use crate::options::MapOptions;

/// Handlers this build ships, with their labels.
const TOGGLES: [(HandlerKind, &str); 3] = [
    (HandlerKind::ScrollZoom, "Scroll zoom"),
    (HandlerKind::BoxZoom, "Box zoom (shift + drag)"),
    (HandlerKind::DragPan, "Drag pan"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsPanelProps {
    pub options: MapOptions,
    pub on_change: Callback<MapOptions>,
}

#[function_component(SettingsPanel)]
pub fn settings_panel(props: &SettingsPanelProps) -> Html {
    let toggle_interactive = {
        let cb = props.on_change.clone();
        let options = props.options.clone();
        Callback::from(move |_| {
            cb.emit(MapOptions {
                interactive: !options.interactive,
                ..options.clone()
            })
        })
    };
    let toggle = |kind: HandlerKind| {
        let cb = props.on_change.clone();
        let options = props.options.clone();
        Callback::from(move |_| {
            let mut next = options.clone();
            next.set_flag(kind, !options.flag(kind));
            cb.emit(next);
        })
    };

    html! {<div style="position:absolute; left:12px; top:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 12px; display:flex; flex-direction:column; gap:8px;">
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={props.options.interactive} onclick={toggle_interactive} />
            <span>{"Interactive"}</span>
        </label>
        { for TOGGLES.iter().map(|(kind, label)| html! {
            <label style="display:flex; align-items:center; gap:8px; cursor:pointer; padding-left:12px;">
                <input type="checkbox"
                    checked={props.options.flag(*kind)}
                    disabled={!props.options.interactive}
                    onclick={toggle(*kind)} />
                <span>{ *label }</span>
            </label>
        }) }
    </div>}
}
