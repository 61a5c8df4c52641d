use leptos::prelude::*;
use waveview_core::{FileSelection, PlayerConfig, TransportSnapshot};

/// Shared UI state, provided as context by the page shell.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<PlayerConfig>,
    /// The picked file. Subscribers are only notified when a pick is accepted.
    pub selection: RwSignal<FileSelection<web_sys::File>, LocalStorage>,
    /// Last rejected pick, shown under the picker until the next valid one.
    pub warning: RwSignal<Option<String>>,
    /// Published by the engine session after every controller change.
    pub transport: RwSignal<TransportSnapshot>,
}

impl AppState {
    pub fn new(config: PlayerConfig) -> Self {
        let transport = TransportSnapshot::idle(config.initial_zoom);
        Self {
            config: StoredValue::new(config),
            selection: RwSignal::new_local(FileSelection::new()),
            warning: RwSignal::new(None),
            transport: RwSignal::new(transport),
        }
    }
}
