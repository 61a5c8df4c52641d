use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use waveview_core::time::format_size;
use waveview_core::{FileSelection, SelectionError};
use crate::state::AppState;

/// Apply a pick to `sel`. Returns whether subscribers should be notified,
/// which is only when the pick was accepted; otherwise the reason lands in
/// `rejected` and the engine stays bound to the previous file.
fn select_into<B>(
    sel: &mut FileSelection<B>,
    name: String,
    media_type: String,
    size: u64,
    blob: B,
    rejected: &mut Option<SelectionError>,
) -> bool {
    match sel.select(name, media_type, size, blob) {
        Ok(_) => true,
        Err(e) => {
            *rejected = Some(e);
            false
        }
    }
}

/// Validate `file` and make it the current selection. A rejected pick
/// leaves the selection (and the loaded waveform) alone and tells the user.
fn pick(state: &AppState, file: web_sys::File) {
    let name = file.name();
    let media_type = file.type_();
    let size = file.size() as u64;

    let mut rejected = None;
    state
        .selection
        .maybe_update(|sel| select_into(sel, name, media_type, size, file, &mut rejected));

    match rejected {
        Some(e) => {
            let msg = e.to_string();
            log::warn!("Rejected pick: {msg}");
            state.warning.set(Some(msg.clone()));
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("Please choose an audio file.\n\n{msg}"));
            }
        }
        None => state.warning.set(None),
    }
}

#[component]
pub fn FilePicker() -> impl IntoView {
    let state = expect_context::<AppState>();
    let drag_over = RwSignal::new(false);

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        if let Some(file) = input.files().and_then(|list| list.get(0)) {
            pick(&state, file);
        }
        // Clear so choosing the same file again still fires `change`.
        input.set_value("");
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(true);
    };

    let on_dragleave = move |_: DragEvent| drag_over.set(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|list| list.get(0));
        match file {
            Some(file) => pick(&state, file),
            None => log::debug!("Drop without files ignored"),
        }
    };

    let current = move || {
        state.selection.with(|sel| {
            sel.current()
                .map(|f| format!("{} ({})", f.name(), format_size(f.size())))
        })
    };

    view! {
        <div
            class=move || if drag_over.get() { "file-picker drag-over" } else { "file-picker" }
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <label class="file-picker-btn">
                "Choose audio file"
                <input type="file" accept="audio/*" on:change=on_change />
            </label>
            <span class="file-picker-current">
                {move || current().unwrap_or_else(|| "or drop one here".to_string())}
            </span>
            {move || state.warning.get().map(|msg| view! {
                <div class="file-picker-warning">{msg}</div>
            })}
        </div>
    }
}
