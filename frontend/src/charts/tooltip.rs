use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::chart::TooltipStyle;
use shared::{ChartConfig, HitMap};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::services::dom::document;

const TOOLTIP_ID: &str = "chart-tooltip";

thread_local! {
    /// Hover listeners per mount point. Replacing an entry drops, and so
    /// detaches, the listeners of the previous chart on that canvas.
    static HOVER_LISTENERS: RefCell<HashMap<String, [EventListener; 2]>> =
        RefCell::new(HashMap::new());
}

/// Show tooltips for the chart just drawn on `canvas`.
pub fn install(canvas: &HtmlCanvasElement, mount_id: &str, config: ChartConfig, hits: HitMap) {
    let config = Rc::new(config);
    let hits = Rc::new(hits);

    let on_move = {
        let target = canvas.clone();
        EventListener::new(canvas.as_ref(), "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (x, y) = canvas_point(&target, event);
            match hits.hit(x, y) {
                Some(index) => show(&config, index, event.page_x(), event.page_y()),
                None => hide(),
            }
        })
    };
    let on_leave = EventListener::new(canvas.as_ref(), "mouseleave", |_| hide());

    HOVER_LISTENERS.with(|listeners| {
        listeners.borrow_mut().insert(mount_id.to_string(), [on_move, on_leave]);
    });
}

/// Detach the hover listeners of a mount point, if any.
pub fn uninstall(mount_id: &str) {
    HOVER_LISTENERS.with(|listeners| {
        listeners.borrow_mut().remove(mount_id);
    });
}

#[cfg(test)]
pub fn is_installed(mount_id: &str) -> bool {
    HOVER_LISTENERS.with(|listeners| listeners.borrow().contains_key(mount_id))
}

/// Pointer position in canvas pixels, undoing any CSS scaling of the canvas.
fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f64, f64) {
    let scale = |pixels: u32, css: i32| if css > 0 { pixels as f64 / css as f64 } else { 1.0 };
    (
        event.offset_x() as f64 * scale(canvas.width(), canvas.client_width()),
        event.offset_y() as f64 * scale(canvas.height(), canvas.client_height()),
    )
}

fn tooltip_element(style: &TooltipStyle) -> Option<HtmlElement> {
    let document = document();
    let element = match document.get_element_by_id(TOOLTIP_ID) {
        Some(element) => element,
        None => {
            let element = document.create_element("div").ok()?;
            element.set_id(TOOLTIP_ID);
            element.set_class_name("chart-tooltip");
            document.body()?.append_child(&element).ok()?;
            element
        }
    };
    let element: HtmlElement = element.dyn_into().ok()?;

    let border = match &style.border_color {
        Some(color) if style.border_width > 0 => {
            format!("{}px solid {}", style.border_width, color)
        }
        _ => "none".to_string(),
    };
    let css = element.style();
    let _ = css.set_property("position", "absolute");
    let _ = css.set_property("pointer-events", "none");
    let _ = css.set_property("z-index", "1000");
    let _ = css.set_property("border-radius", "6px");
    let _ = css.set_property("background", &style.background_color);
    let _ = css.set_property("color", &style.text_color);
    let _ = css.set_property("padding", &format!("{}px", style.padding));
    let _ = css.set_property("border", &border);
    Some(element)
}

fn show(config: &ChartConfig, index: usize, page_x: i32, page_y: i32) {
    let style = &config.options.tooltip;
    let Some(element) = tooltip_element(style) else {
        return;
    };
    element.set_inner_html("");
    let document = document();

    if let Some(title) = config.tooltip_title(index) {
        if let Ok(line) = document.create_element("div") {
            let _ = line.set_attribute(
                "style",
                &format!(
                    "font-size: {}px; font-weight: {}; margin-bottom: 4px;",
                    style.title_font.size,
                    style.title_font.weight.as_deref().unwrap_or("normal")
                ),
            );
            line.set_text_content(Some(title));
            let _ = element.append_child(&line);
        }
    }

    for item in config.tooltip_items(index) {
        let Ok(line) = document.create_element("div") else {
            continue;
        };
        let _ = line.set_attribute("style", &format!("font-size: {}px;", style.body_font.size));
        if style.display_colors {
            if let (Some(color), Ok(swatch)) = (&item.color, document.create_element("span")) {
                let _ = swatch.set_attribute(
                    "style",
                    &format!(
                        "display: inline-block; width: 10px; height: 10px; \
                         margin-right: 6px; background: {};",
                        color
                    ),
                );
                let _ = line.append_child(&swatch);
            }
        }
        let _ = line.append_with_str_1(&item.text);
        let _ = element.append_child(&line);
    }

    let css = element.style();
    let _ = css.set_property("left", &format!("{}px", page_x + 12));
    let _ = css.set_property("top", &format!("{}px", page_y + 12));
    let _ = css.set_property("display", "block");
}

fn hide() {
    if let Some(element) = document()
        .get_element_by_id(TOOLTIP_ID)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let _ = element.style().set_property("display", "none");
    }
}
