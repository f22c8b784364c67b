/// Tab Sessions - save and restore the tabs of a browser window
/// Built with Rust + WASM + Yew

mod config;
mod controller;
mod error;
mod host;
mod storage;
mod tab_data;
mod tabs;
#[cfg(test)]
mod testing;
mod view;
pub mod ui;

pub use controller::{Clock, Feedback, FeedbackKind, PopupController, PopupState};
pub use error::{Result, SessionError};
pub use host::BrowserClock;
pub use storage::{KeyValueStore, SessionStore};
pub use tab_data::{SavedTab, Session, TabInfo};
pub use tabs::{capture_current_window_tabs, restore_session, TabHost};
pub use view::{render, SessionListView, SessionRow};

use wasm_bindgen::prelude::*;

// Set up panic hook and logging for the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::LOG_LEVEL));
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
