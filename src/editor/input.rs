//! DOM `<input>` binding for the active cell editor.
//!
//! The host hands over the input element it renders inside the editing cell.
//! This module applies focus, selection and invalid styling to it and
//! forwards `keydown` / `input` events to the table. Keyboard policy lives in
//! the editors; here we only act on the returned disposition.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, KeyboardEvent};

use super::FocusAction;

/// CSS class toggled on the input while its draft is invalid.
pub(crate) const INVALID_CLASS: &str = "is-invalid";

/// Input element plus the listeners registered on it.
pub(crate) struct EditorInput {
    input: HtmlInputElement,
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    input_closure: Option<Closure<dyn FnMut(Event)>>,
}

impl EditorInput {
    pub(crate) fn new(input: HtmlInputElement) -> Self {
        // numeric-only behaviour comes from key filtering, not from type=number
        input.set_type("text");
        EditorInput {
            input,
            key_closure: None,
            input_closure: None,
        }
    }

    pub(crate) fn element(&self) -> &HtmlInputElement {
        &self.input
    }

    /// Register the event handlers, replacing any previous ones.
    pub(crate) fn listen(
        &mut self,
        on_key: Box<dyn FnMut(KeyboardEvent)>,
        on_input: Box<dyn FnMut(Event)>,
    ) {
        self.unlisten();
        let key_closure = Closure::wrap(on_key);
        self.input
            .add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())
            .ok();
        let input_closure = Closure::wrap(on_input);
        self.input
            .add_event_listener_with_callback("input", input_closure.as_ref().unchecked_ref())
            .ok();
        self.key_closure = Some(key_closure);
        self.input_closure = Some(input_closure);
    }

    fn unlisten(&mut self) {
        if let Some(closure) = self.key_closure.take() {
            let _ = self
                .input
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        if let Some(closure) = self.input_closure.take() {
            let _ = self
                .input
                .remove_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EditorInput {
    fn drop(&mut self) {
        self.unlisten();
    }
}

/// Show the input with `draft`, take focus and apply the editor's focus
/// action synchronously.
pub(crate) fn show(input: &HtmlInputElement, draft: Option<&str>, focus: FocusAction) {
    let _ = input.style().set_property("display", "block");
    input.set_value(draft.unwrap_or_default());
    let _ = input.focus();
    match focus {
        FocusAction::SelectAll => input.select(),
        FocusAction::CaretAt(at) => {
            let at = u32::try_from(at).unwrap_or(u32::MAX);
            let _ = input.set_selection_range(at, at);
        }
    }
}

/// Hide the input and drop focus.
pub(crate) fn hide(input: &HtmlInputElement) {
    set_invalid(input, false, None);
    let _ = input.style().set_property("display", "none");
    let _ = input.blur();
}

/// Reflect the editor's invalid flag and message on the element.
pub(crate) fn set_invalid(input: &HtmlInputElement, invalid: bool, message: Option<&str>) {
    let _ = input.class_list().toggle_with_force(INVALID_CLASS, invalid);
    let _ = input.set_attribute("aria-invalid", if invalid { "true" } else { "false" });
    input.set_custom_validity(if invalid { message.unwrap_or_default() } else { "" });
}
