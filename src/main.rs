#![allow(warnings)]
//! Transit Desk Frontend Entry Point

mod api;
mod app;
mod cache;
mod components;
mod config;
mod context;
mod models;
mod notify;
mod store;
mod validation;

use app::{open_storage, App};
use config::AppConfig;
use leptos::prelude::*;
use tracing::Level;

/// Records kept for the diagnostics panel
const LOG_CAPACITY: usize = 200;

fn main() {
    console_error_panic_hook::set_once();

    let max_level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    let logs = match ring_logger::init(LOG_CAPACITY, max_level) {
        Ok(buffer) => Some(buffer),
        Err(e) => {
            web_sys::console::warn_1(&e.to_string().into());
            None
        }
    };

    let storage = open_storage();
    let config = AppConfig::load(storage.as_ref());

    mount_to_body(move || view! { <App config=config.clone() storage=storage.clone() logs=logs.clone() /> });
}
