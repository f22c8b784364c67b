/// Browser implementations of the storage, tab and clock ports

use crate::controller::Clock;
use crate::error::{self, SessionError};
use crate::storage::KeyValueStore;
use crate::tab_data::TabInfo;
use crate::tabs::TabHost;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getCurrentWindowTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str, active: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// chrome.storage.local
pub struct ChromeStorage;

#[async_trait(?Send)]
impl KeyValueStore for ChromeStorage {
    async fn get(&self, key: &str) -> error::Result<Option<Value>> {
        let value_js = getStorage(key)
            .await
            .map_err(|e| SessionError::Storage(format!("Failed to read '{}': {:?}", key, e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| SessionError::Json(format!("Failed to parse '{}': {:?}", key, e)))
    }

    async fn set(&self, key: &str, value: Value) -> error::Result<()> {
        // Plain objects rather than JS Maps, which chrome.storage cannot hold
        let value_js = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| SessionError::Json(format!("Failed to serialize '{}': {:?}", key, e)))?;

        setStorage(key, value_js)
            .await
            .map_err(|e| SessionError::Storage(format!("Failed to write '{}': {:?}", key, e)))
    }
}

/// chrome.tabs, scoped to the window the popup belongs to
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabHost for ChromeTabs {
    async fn query_current_window(&self) -> error::Result<Vec<TabInfo>> {
        let tabs_js = getCurrentWindowTabs()
            .await
            .map_err(|e| SessionError::Tabs(format!("Failed to get tabs: {:?}", e)))?;

        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| SessionError::Tabs(format!("Failed to parse tabs: {:?}", e)))
    }

    async fn create_tab(&self, url: &str, active: bool) -> error::Result<()> {
        createTab(url, active)
            .await
            .map_err(|e| SessionError::Tabs(format!("Failed to open {}: {:?}", url, e)))
    }
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    fn format_local(&self, millis: i64) -> String {
        let date = js_sys::Date::new(&JsValue::from_f64(millis as f64));
        date.to_locale_string("default", &JsValue::UNDEFINED).into()
    }
}

/// Blocking `window.confirm`; false when there is no window
pub fn confirm_action(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
