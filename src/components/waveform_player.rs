use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, KeyboardEvent, WheelEvent};
use waveview_core::input::{self, Modifiers, WheelGesture};
use waveview_core::Phase;
use crate::components::transport::TransportBar;
use crate::engine::session;
use crate::state::AppState;

/// Input types where Space and arrows are text editing, not transport.
const TEXT_INPUT_TYPES: &[&str] = &["text", "search", "number", "email", "url", "password", "tel"];

fn typing_in_field(ev: &KeyboardEvent) -> bool {
    let Some(target) = ev.target() else { return false };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return TEXT_INPUT_TYPES.contains(&input.type_().as_str());
    }
    match target.dyn_ref::<HtmlElement>() {
        Some(el) => el.is_content_editable() || el.tag_name() == "TEXTAREA",
        None => false,
    }
}

fn modifiers(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

#[component]
pub fn WaveformPlayer() -> impl IntoView {
    let state = expect_context::<AppState>();
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let config = state.config.get_value();

    session::install(session::create(config.clone(), container_ref, state.transport));

    // (Re)bind the engine whenever a new file is accepted. Effects run after
    // mount, so the container is in the DOM by then.
    Effect::new(move || {
        let file = state.selection.with(|sel| sel.current().cloned());
        if let Some(file) = file {
            session::with_session(|s| s.load(&file));
        }
    });

    // Global shortcuts live exactly as long as the player is mounted.
    let key_config = config.clone();
    let keys = window_event_listener(leptos::ev::keydown, move |ev: KeyboardEvent| {
        if typing_in_field(&ev) {
            return;
        }
        let key = ev.key();
        let mods = modifiers(ev.ctrl_key(), ev.shift_key(), ev.alt_key(), ev.meta_key());
        if !input::is_transport_key(&key, mods) {
            return;
        }
        ev.prevent_default();
        if let Some(command) = input::key_command(&key, mods, ev.repeat(), &key_config) {
            session::with_session(|s| s.apply(command));
        }
    });
    on_cleanup(move || {
        keys.remove();
        session::uninstall();
    });

    let wheel_config = config;
    let on_wheel = move |ev: WheelEvent| {
        let mods = modifiers(ev.ctrl_key(), ev.shift_key(), ev.alt_key(), ev.meta_key());
        let gesture = input::wheel_gesture(ev.delta_y(), mods, &wheel_config);
        if gesture.prevents_default() {
            ev.prevent_default();
        }
        if let WheelGesture::Zoom(factor) = gesture {
            session::with_session(|s| s.zoom_by(factor));
        }
    };

    let overlay = move || {
        state.transport.with(|t| match (t.phase, &t.fault) {
            (_, Some(fault)) => Some(format!("Could not load this file: {fault}")),
            (Phase::Idle, _) => Some("Choose an audio file to see its waveform".to_string()),
            (Phase::Loading, _) => Some("Decoding\u{2026}".to_string()),
            (Phase::Ready, _) | (Phase::Destroyed, _) => None,
        })
    };

    view! {
        <div class="player">
            <div class="waveform-area">
                // wavesurfer owns this element's children.
                <div class="waveform" node_ref=container_ref on:wheel=on_wheel></div>
                {move || overlay().map(|text| view! {
                    <div class="empty-state">{text}</div>
                })}
            </div>
            <TransportBar />
        </div>
    }
}
