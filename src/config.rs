use waveview_core::PlayerConfig;

/// `localStorage` key holding a JSON [`PlayerConfig`] override.
pub const STORAGE_KEY: &str = "waveview.config";

/// Load the player config from local storage, falling back to defaults.
pub fn load() -> PlayerConfig {
    let Some(text) = read_storage(STORAGE_KEY) else {
        log::debug!("No stored config, using defaults");
        return PlayerConfig::default();
    };
    match PlayerConfig::from_json(&text) {
        Ok(cfg) => {
            log::info!("Loaded config from localStorage[{STORAGE_KEY:?}]");
            cfg
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            PlayerConfig::default()
        }
    }
}

fn read_storage(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}
