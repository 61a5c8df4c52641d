use leptos::prelude::*;
use crate::engine::session;
use crate::state::AppState;

/// Play/pause, position readout and zoom controls. Everything is disabled
/// until the engine reports ready.
#[component]
pub fn TransportBar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let step = state.config.with_value(|c| c.zoom_step);
    let initial_zoom = state.config.with_value(|c| c.initial_zoom.px_per_sec());
    let disabled = move || !state.transport.with(|t| t.is_ready());

    view! {
        <div class="transport"
            on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
        >
            <button
                class="layer-btn"
                disabled=disabled
                on:click=move |_| {
                    session::with_session(|s| s.toggle_play_pause());
                }
                title="Play / pause (Space)"
            >
                {move || if state.transport.with(|t| t.playing) { "Pause" } else { "Play" }}
            </button>
            <span class="transport-time">
                {move || state.transport.with(|t| t.progress_text())}
            </span>

            <div style="flex: 1;"></div>

            <button
                class="layer-btn"
                disabled=disabled
                on:click=move |_| {
                    session::with_session(|s| s.zoom_by(1.0 / step));
                }
                title="Zoom out (Ctrl + wheel)"
            >"\u{2212}"</button>
            <span
                class="transport-zoom"
                on:dblclick=move |_| {
                    session::with_session(|s| s.set_zoom(initial_zoom));
                }
                title="Double-click to reset zoom"
            >
                {move || format!("{} px/s", state.transport.with(|t| t.zoom.readout()))}
            </span>
            <button
                class="layer-btn"
                disabled=disabled
                on:click=move |_| {
                    session::with_session(|s| s.zoom_by(step));
                }
                title="Zoom in (Ctrl + wheel)"
            >"+"</button>
        </div>
    }
}
