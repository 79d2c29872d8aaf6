/// wasm-bindgen bindings to the `chrome.*` extension APIs

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_STORAGE_KEY, ExtensionConfig};
use crate::error::{ConfigError, HostError};
use crate::host::TabHost;
use crate::tab_data::{ChangeInfo, GroupId, TabGroup, TabId, TabInfo, TabQuery, WindowId, WindowUpdate};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn tabs_query(query: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = group)]
    async fn tabs_group(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = update)]
    async fn tabs_update(tab_id: i32, props: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "tabs", "onUpdated"], js_name = addListener)]
    fn tabs_on_updated_add_listener(callback: &Closure<dyn FnMut(i32, JsValue, JsValue)>);

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabGroups"], js_name = query)]
    async fn tab_groups_query(query: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabGroups"], js_name = update)]
    async fn tab_groups_update(group_id: i32, props: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = update)]
    async fn windows_update(window_id: i32, props: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn storage_get(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn storage_set(items: JsValue) -> Result<JsValue, JsValue>;
}

/// Pull a readable message out of a rejected promise value
fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn host_error(value: JsValue) -> HostError {
    HostError::from_message(&js_message(&value))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, HostError> {
    // Plain objects, not Maps, for the extension APIs
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupOptions<'a> {
    tab_ids: &'a [TabId],
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<GroupId>,
}

#[derive(Serialize)]
struct TitleQuery<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct ActiveUpdate {
    active: bool,
}

/// [`TabHost`] backed by the running browser
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeHost;

impl TabHost for ChromeHost {
    async fn query_tabs(&self, query: &TabQuery) -> Result<Vec<TabInfo>, HostError> {
        let tabs_js = tabs_query(to_js(query)?).await.map_err(host_error)?;
        Ok(serde_wasm_bindgen::from_value(tabs_js)?)
    }

    async fn query_groups(&self, title: &str) -> Result<Vec<TabGroup>, HostError> {
        let groups_js = tab_groups_query(to_js(&TitleQuery { title })?)
            .await
            .map_err(host_error)?;
        Ok(serde_wasm_bindgen::from_value(groups_js)?)
    }

    async fn group_tabs(&self, tab_ids: &[TabId], group_id: Option<GroupId>) -> Result<GroupId, HostError> {
        let options = GroupOptions { tab_ids, group_id };
        let id_js = tabs_group(to_js(&options)?).await.map_err(host_error)?;
        Ok(serde_wasm_bindgen::from_value(id_js)?)
    }

    async fn update_group_title(&self, group_id: GroupId, title: &str) -> Result<(), HostError> {
        tab_groups_update(group_id, to_js(&TitleQuery { title })?)
            .await
            .map_err(host_error)?;
        Ok(())
    }

    async fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError> {
        tabs_update(tab_id, to_js(&ActiveUpdate { active: true })?)
            .await
            .map_err(host_error)?;
        Ok(())
    }

    async fn update_window(&self, window_id: WindowId, update: &WindowUpdate) -> Result<(), HostError> {
        windows_update(window_id, to_js(update)?)
            .await
            .map_err(host_error)?;
        Ok(())
    }
}

/// Register `handler` for `tabs.onUpdated` for the life of the worker.
///
/// Events whose payload cannot be decoded are logged and dropped.
pub fn on_tab_updated<F>(mut handler: F)
where
    F: FnMut(TabId, ChangeInfo, TabInfo) + 'static,
{
    let callback = Closure::wrap(Box::new(move |tab_id: i32, change_js: JsValue, tab_js: JsValue| {
        let change = serde_wasm_bindgen::from_value::<ChangeInfo>(change_js);
        let tab = serde_wasm_bindgen::from_value::<TabInfo>(tab_js);
        match (change, tab) {
            (Ok(change), Ok(tab)) => handler(tab_id, change, tab),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("dropping tabs.onUpdated event for tab {}: {}", tab_id, e);
            }
        }
    }) as Box<dyn FnMut(i32, JsValue, JsValue)>);

    tabs_on_updated_add_listener(&callback);
    callback.forget();
}

/// Load settings, falling back to defaults when nothing is stored yet
pub async fn load_config() -> Result<ExtensionConfig, ConfigError> {
    let items = storage_get(CONFIG_STORAGE_KEY)
        .await
        .map_err(|e| ConfigError::Storage(js_message(&e)))?;

    let stored = Reflect::get(&items, &JsValue::from_str(CONFIG_STORAGE_KEY))
        .map_err(|e| ConfigError::Storage(js_message(&e)))?;

    if stored.is_null() || stored.is_undefined() {
        return Ok(ExtensionConfig::default());
    }

    serde_wasm_bindgen::from_value(stored)
        .map_err(|e| ConfigError::Storage(format!("Failed to parse config: {}", e)))
}

pub async fn save_config(config: &ExtensionConfig) -> Result<(), ConfigError> {
    config.validate()?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let config_js = config
        .serialize(&serializer)
        .map_err(|e| ConfigError::Storage(format!("Failed to serialize config: {}", e)))?;

    let items = Object::new();
    Reflect::set(&items, &JsValue::from_str(CONFIG_STORAGE_KEY), &config_js)
        .map_err(|e| ConfigError::Storage(js_message(&e)))?;

    storage_set(items.into())
        .await
        .map_err(|e| ConfigError::Storage(js_message(&e)))?;

    Ok(())
}
