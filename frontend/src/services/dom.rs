use shared::{ChartKind, RenderError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, NodeList};

/// Attribute marking the placeholder inserted for a mount point.
const PLACEHOLDER_ATTR: &str = "data-placeholder-for";

pub fn document() -> Document {
    gloo::utils::document()
}

/// Anything selectors can be run against.
pub trait Queryable {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
}

impl Queryable for Document {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Queryable for Element {
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

/// All elements under `root` matching `selector`, in document order.
/// An invalid selector matches nothing.
pub fn query_all<Q: Queryable>(root: &Q, selector: &str) -> Vec<Element> {
    let list = match root.select_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Resolve a chart mount point to its canvas.
pub fn canvas_by_id(mount_id: &str) -> Result<HtmlCanvasElement, RenderError> {
    let element = document()
        .get_element_by_id(mount_id)
        .ok_or_else(|| RenderError::MissingSurface { mount_id: mount_id.to_string() })?;
    element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| RenderError::NotACanvas { mount_id: mount_id.to_string() })
}

fn find_placeholder(container: &Element, mount_id: &str) -> Option<Element> {
    query_all(container, &format!("p[{}]", PLACEHOLDER_ATTR))
        .into_iter()
        .find(|p| p.get_attribute(PLACEHOLDER_ATTR).as_deref() == Some(mount_id))
}

/// Show the empty-data message next to the canvas. A mount point gets at most
/// one placeholder however often it is rendered.
pub fn show_placeholder(canvas: &HtmlCanvasElement, mount_id: &str, kind: ChartKind) {
    let Some(container) = canvas.parent_element() else {
        return;
    };
    if find_placeholder(&container, mount_id).is_some() {
        return;
    }
    let Ok(placeholder) = document().create_element("p") else {
        return;
    };
    placeholder.set_class_name("text-center text-muted");
    let _ = placeholder.set_attribute("style", "padding: 2rem;");
    let _ = placeholder.set_attribute(PLACEHOLDER_ATTR, mount_id);
    placeholder.set_text_content(Some(kind.placeholder_text()));
    let _ = container.append_child(&placeholder);
}

/// Remove a placeholder left by an earlier empty render.
pub fn clear_placeholder(canvas: &HtmlCanvasElement, mount_id: &str) {
    if let Some(container) = canvas.parent_element() {
        if let Some(placeholder) = find_placeholder(&container, mount_id) {
            placeholder.remove();
        }
    }
}

/// Text of a `<script type="application/json">` block, if the page has one.
pub fn json_script(id: &str) -> Option<String> {
    document()
        .get_element_by_id(id)
        .and_then(|script| script.text_content())
        .filter(|text| !text.trim().is_empty())
}
