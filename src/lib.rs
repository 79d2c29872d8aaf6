/// Tab Grouper - Chrome Extension that files tabs into named groups
/// Built with Rust + WASM + Yew

mod chrome;
mod collate;
mod config;
mod domain;
mod error;
mod host;
mod match_pattern;
mod operations;
mod resolver;
mod tab_data;
mod watcher;
pub mod ui;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::chrome::ChromeHost;
use crate::config::ExtensionConfig;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Service worker entry: must run synchronously at worker startup so the
// listener is registered before the browser delivers queued events
#[wasm_bindgen]
pub fn start_background() {
    chrome::on_tab_updated(|tab_id, change, tab| {
        // Most updates are title/favicon/loading noise: skip the storage read
        if let Some(reason) = watcher::skip_reason(&change, &tab) {
            log::debug!("tab {} ignored: {:?}", tab_id, reason);
            return;
        }
        spawn_local(async move {
            let config = match chrome::load_config().await {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("using default config: {}", e);
                    ExtensionConfig::default()
                }
            };
            watcher::dispatch_tab_updated(&ChromeHost, &config, tab_id, &change, &tab).await;
        });
    });
    log::info!("tab watcher registered");
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options_page() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
