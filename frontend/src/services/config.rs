use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use shared::AppConfig;

use super::dom::json_script;
use super::Logger;

thread_local! {
    static APP_CONFIG: RefCell<Option<Rc<AppConfig>>> = const { RefCell::new(None) };
}

/// Page configuration, read once from the embedded `app-config` script and
/// shared afterwards.
pub fn app_config() -> Rc<AppConfig> {
    APP_CONFIG.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| Rc::new(load_app_config()))
            .clone()
    })
}

fn load_app_config() -> AppConfig {
    match read_page_config() {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            Logger::warn_with_component("config", &format!("{:#}; using defaults", e));
            AppConfig::default()
        }
    }
}

fn read_page_config() -> anyhow::Result<Option<AppConfig>> {
    let Some(json) = json_script(AppConfig::SCRIPT_ID) else {
        return Ok(None);
    };
    let config = AppConfig::from_json(&json).context("Failed to read page configuration")?;
    Ok(Some(config))
}
