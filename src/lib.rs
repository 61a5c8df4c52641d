use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod components;
pub mod config;
pub mod engine;
pub mod state;

use components::app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Verbose until the stored config says otherwise, so config warnings show.
    let _ = console_log::init_with_level(log::Level::Debug);

    let config = config::load();
    log::set_max_level(config.log_level());
    log::info!("waveview {} starting", env!("CARGO_PKG_VERSION"));

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
