//! Functions exposed to page scripts.
//!
//! Values coming from JavaScript are loosely typed, so every export accepts
//! `JsValue` where a page might pass either numbers or strings. Renderers
//! report success as a boolean; the reason for a failure is in the console.

use js_sys::Array;
use shared::{format_currency, format_date, Amount, NotificationKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::charts;
use crate::services::app_config;
use crate::ui;

/// Elements of a JS array as strings. Numbers are printed; anything else
/// becomes an empty label. A non-array yields no labels.
fn js_strings(value: &JsValue) -> Vec<String> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value)
        .iter()
        .map(|item| {
            item.as_string()
                .or_else(|| item.as_f64().map(|n| n.to_string()))
                .unwrap_or_default()
        })
        .collect()
}

/// Elements of a JS array as numbers, parsing numeric strings the way
/// `parseFloat` does.
fn js_numbers(value: &JsValue) -> Vec<f64> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value).iter().map(|item| js_amount(&item)).collect()
}

fn js_amount(value: &JsValue) -> f64 {
    match (value.as_f64(), value.as_string()) {
        (Some(n), _) => n,
        (None, Some(s)) => s.as_str().to_amount(),
        (None, None) => f64::NAN,
    }
}

#[wasm_bindgen(js_name = renderDoughnut)]
pub fn render_doughnut(mount_id: &str, labels: JsValue, values: JsValue) -> bool {
    charts::render_doughnut(mount_id, &js_strings(&labels), &js_numbers(&values)).is_ok()
}

#[wasm_bindgen(js_name = renderLine)]
pub fn render_line(mount_id: &str, labels: JsValue, income: JsValue, expense: JsValue) -> bool {
    charts::render_line(
        mount_id,
        &js_strings(&labels),
        &js_numbers(&income),
        &js_numbers(&expense),
    )
    .is_ok()
}

#[wasm_bindgen(js_name = renderBar)]
pub fn render_bar(
    mount_id: &str,
    labels: JsValue,
    values: JsValue,
    series_name: Option<String>,
) -> bool {
    charts::render_bar(
        mount_id,
        &js_strings(&labels),
        &js_numbers(&values),
        series_name.as_deref(),
    )
    .is_ok()
}

#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency_js(amount: JsValue) -> String {
    format_currency(js_amount(&amount))
}

/// Accepts a date string or a JS `Date`.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date_js(input: JsValue) -> String {
    let text = match input.dyn_ref::<js_sys::Date>() {
        Some(date) => String::from(date.to_iso_string()),
        None => input.as_string().unwrap_or_default(),
    };
    format_date(&text)
}

#[wasm_bindgen(js_name = confirmDelete)]
pub fn confirm_delete(message: Option<String>) -> bool {
    ui::confirm_delete(message.as_deref())
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) {
    let kind = kind
        .and_then(|k| k.parse::<NotificationKind>().ok())
        .unwrap_or_default();
    ui::show_notification(message, kind);
}

#[wasm_bindgen(js_name = updateBudgetProgress)]
pub fn update_budget_progress() -> u32 {
    ui::update_budget_progress(&app_config()) as u32
}
