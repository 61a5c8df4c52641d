use leptos::prelude::*;
use waveview_core::PlayerConfig;
use crate::state::AppState;
use crate::components::file_picker::FilePicker;
use crate::components::waveform_player::WaveformPlayer;

#[component]
pub fn App(config: PlayerConfig) -> impl IntoView {
    let state = AppState::new(config);
    provide_context(state);

    view! {
        <div class="app">
            <div class="toolbar">
                <span class="toolbar-brand"><b>"wave"</b><i>"view"</i></span>
            </div>
            <FilePicker />
            <WaveformPlayer />
        </div>
    }
}
