use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::{AppConfig, DashboardData};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::forms::attach_all;
use super::progress::update_budget_progress;
use crate::components::dashboard::{Dashboard, DashboardProps};
use crate::services::dom::{document, json_script};
use crate::services::{app_config, Logger};

thread_local! {
    static INITIALIZED: Cell<bool> = const { Cell::new(false) };
}

/// Entry point: initialize once the document has been parsed.
pub fn bootstrap() {
    let document = document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| {
            run_once();
        })
        .forget();
    } else {
        run_once();
    }
}

/// Initialize the page unless that already happened. Returns whether this
/// call did the work.
pub fn run_once() -> bool {
    if INITIALIZED.with(|done| done.replace(true)) {
        Logger::debug_with_component("bootstrap", "Already initialized");
        return false;
    }
    initialize_app(app_config());
    true
}

/// Wire every page affordance.
pub fn initialize_app(config: Rc<AppConfig>) {
    Logger::info_with_component("bootstrap", "App initialized");

    let bars = update_budget_progress(&config);
    Logger::debug_with_component("bootstrap", &format!("Updated {} progress bars", bars));

    if config.smooth_scroll {
        enable_smooth_scroll();
    }

    let forms = attach_all(&config);
    Logger::debug_with_component("bootstrap", &format!("Validating {} forms", forms));

    mount_dashboard(&config);
}

fn enable_smooth_scroll() {
    let Some(root) = document()
        .document_element()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let _ = root.style().set_property("scroll-behavior", "smooth");
}

/// Mount the dashboard component when the page embeds dashboard data.
/// Returns whether it was mounted.
pub fn mount_dashboard(config: &Rc<AppConfig>) -> bool {
    let Some(json) = json_script(&config.dashboard_data_id) else {
        return false;
    };
    let data = match DashboardData::from_json(&json) {
        Ok(data) => data,
        Err(e) => {
            Logger::warn_with_component("bootstrap", &format!("Ignoring dashboard data: {}", e));
            return false;
        }
    };
    let Some(root) = document().get_element_by_id(&config.dashboard_root_id) else {
        Logger::warn_with_component(
            "bootstrap",
            &format!("Dashboard data present but #{} is missing", config.dashboard_root_id),
        );
        return false;
    };

    let props = DashboardProps { data: Rc::new(data), config: Rc::clone(config) };
    yew::Renderer::<Dashboard>::with_root_and_props(root, props).render();
    true
}
