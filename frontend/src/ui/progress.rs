use shared::{parse_width_percent, AppConfig, ProgressLevel};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::services::dom::{self, query_all, Queryable};

/// Recompute the level class of every budget progress bar on the page.
/// Returns how many bars were visited.
pub fn update_budget_progress(config: &AppConfig) -> usize {
    update_progress_in(&dom::document(), config)
}

pub fn update_progress_in<Q: Queryable>(root: &Q, config: &AppConfig) -> usize {
    let bars = query_all(root, &config.progress_selector);
    for bar in &bars {
        apply_level(bar, bar_level(bar, config));
    }
    bars.len()
}

/// Level for a bar's inline width; a bar without a readable width gets none.
fn bar_level(bar: &Element, config: &AppConfig) -> Option<ProgressLevel> {
    let width = bar.dyn_ref::<HtmlElement>()?.style().get_property_value("width").ok()?;
    let percent = parse_width_percent(&width)?;
    Some(ProgressLevel::classify(percent, config.warning_threshold, config.danger_threshold))
}

fn apply_level(bar: &Element, level: Option<ProgressLevel>) {
    let classes = bar.class_list();
    for class in ProgressLevel::CLASSES {
        let _ = classes.remove_1(class);
    }
    if let Some(class) = level.and_then(|level| level.css_class()) {
        let _ = classes.add_1(class);
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn progress_track(widths: &[&str]) -> Element {
        let document = dom::document();
        let root = document.create_element("div").unwrap();
        for width in widths {
            let track = document.create_element("div").unwrap();
            track.set_class_name("progress");
            let bar = document.create_element("div").unwrap();
            bar.set_class_name("bar");
            bar.set_attribute("style", &format!("width: {};", width)).unwrap();
            track.append_child(&bar).unwrap();
            root.append_child(&track).unwrap();
        }
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn bar_classes(root: &Element) -> Vec<String> {
        query_all(root, ".progress .bar")
            .iter()
            .map(|bar| bar.class_name())
            .collect()
    }

    #[wasm_bindgen_test]
    fn test_thresholds() {
        let root = progress_track(&["92%", "80%", "50%"]);
        let count = update_progress_in(&root, &AppConfig::default());
        assert_eq!(count, 3);
        assert_eq!(bar_classes(&root), vec!["bar danger", "bar warning", "bar"]);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_update_is_idempotent_and_drops_stale_class() {
        let root = progress_track(&["80%"]);
        let config = AppConfig::default();
        update_progress_in(&root, &config);
        update_progress_in(&root, &config);
        assert_eq!(bar_classes(&root), vec!["bar warning"]);

        let bar: HtmlElement = query_all(&root, ".bar").remove(0).dyn_into().unwrap();
        bar.style().set_property("width", "95%").unwrap();
        update_progress_in(&root, &config);
        assert_eq!(bar_classes(&root), vec!["bar danger"]);

        bar.style().set_property("width", "10%").unwrap();
        update_progress_in(&root, &config);
        assert_eq!(bar_classes(&root), vec!["bar"]);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_unreadable_width_clears_classes() {
        let root = progress_track(&["auto"]);
        let bar = query_all(&root, ".bar").remove(0);
        bar.class_list().add_1("danger").unwrap();
        update_progress_in(&root, &AppConfig::default());
        assert_eq!(bar_classes(&root), vec!["bar"]);
        root.remove();
    }
}
