use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use shared::{
    check_required, AppConfig, NotificationKind, ValidationOutcome, REQUIRED_FIELDS_MESSAGE,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use super::notifications::show_notification;
use crate::services::dom::{document, query_all};

/// Current value of a form control; anything that is not an input or select
/// counts as empty.
fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

/// Check the required fields of `form` and color their borders by status.
pub fn validate_form(form: &Element, config: &AppConfig) -> ValidationOutcome {
    let fields = query_all(form, &config.required_selector);
    let outcome = check_required(fields.iter().map(field_value));

    for (field, status) in fields.iter().zip(&outcome.statuses) {
        if let Some(field) = field.dyn_ref::<HtmlElement>() {
            let _ = field.style().set_property("border-color", status.border_color(&config.theme));
        }
    }
    outcome
}

/// Block submission of `form` while a required field is empty.
///
/// The listener stays attached for as long as the returned handle lives.
pub fn attach_form_validation(form: &Element, config: Rc<AppConfig>) -> EventListener {
    let target = form.clone();
    EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let outcome = validate_form(&target, &config);
            if !outcome.is_valid() {
                event.prevent_default();
                show_notification(REQUIRED_FIELDS_MESSAGE, NotificationKind::Error);
            }
        },
    )
}

/// Attach the submit validator to every form matching the configured
/// selector. Returns how many forms were wired.
pub fn attach_all(config: &Rc<AppConfig>) -> usize {
    let forms = query_all(&document(), &config.form_selector);
    for form in &forms {
        attach_form_validation(form, Rc::clone(config)).forget();
    }
    forms.len()
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use crate::ui::notifications::{notifications_shown, recent_notifications};
    use wasm_bindgen_test::*;
    use web_sys::{Event, EventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn form_with(values: &[&str]) -> Element {
        let document = document();
        let form = document.create_element("form").unwrap();
        form.set_class_name("form");
        for value in values {
            let input: HtmlInputElement =
                document.create_element("input").unwrap().dyn_into().unwrap();
            input.set_required(true);
            input.set_value(value);
            form.append_child(&input).unwrap();
        }
        // Optional fields are never checked.
        let optional = document.create_element("input").unwrap();
        form.append_child(&optional).unwrap();
        document.body().unwrap().append_child(&form).unwrap();
        form
    }

    fn submit(form: &Element) -> Event {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("submit", &init).unwrap();
        form.dispatch_event(&event).unwrap();
        event
    }

    fn borders(form: &Element) -> Vec<String> {
        query_all(form, "input[required]")
            .into_iter()
            .map(|field| {
                field
                    .dyn_into::<HtmlElement>()
                    .unwrap()
                    .style()
                    .get_property_value("border-color")
                    .unwrap()
            })
            .collect()
    }

    #[wasm_bindgen_test]
    fn test_empty_required_field_blocks_submit() {
        let config = Rc::new(AppConfig::default());
        let form = form_with(&["Groceries", ""]);
        let _listener = attach_form_validation(&form, Rc::clone(&config));

        let before = notifications_shown();
        let event = submit(&form);

        assert!(event.default_prevented());
        assert_eq!(notifications_shown(), before + 1);
        let last = recent_notifications().pop().unwrap();
        assert_eq!(last.kind, NotificationKind::Error);
        assert_eq!(last.message, REQUIRED_FIELDS_MESSAGE);
        assert_eq!(borders(&form), vec!["rgb(226, 232, 240)", "rgb(239, 68, 68)"]);
        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_complete_form_submits() {
        let config = Rc::new(AppConfig::default());
        let form = form_with(&["Rent", "1200"]);
        let _listener = attach_form_validation(&form, config);

        let before = notifications_shown();
        let event = submit(&form);

        assert!(!event.default_prevented());
        assert_eq!(notifications_shown(), before);
        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_validate_form_counts_missing() {
        let form = form_with(&["", "", "x"]);
        let outcome = validate_form(&form, &AppConfig::default());
        assert_eq!(outcome.missing_count(), 2);
        assert!(!outcome.is_valid());
        form.remove();
    }
}
