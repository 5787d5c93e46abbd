use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::hook;
use yew::prelude::*;

const FOCUSABLE_QUERY: &str =
    "button, [href], input, textarea, select, [tabindex]:not([tabindex='-1'])";

/// Move focus into the panel when it opens and hand it back when it closes.
#[hook]
pub fn use_focus_management(open: bool, container_ref: NodeRef) {
    use_effect_with((open, container_ref), move |(open, container_ref)| {
        let mut prev_focus: Option<web_sys::HtmlElement> = None;
        let focus_target = if cfg!(target_arch = "wasm32") && *open {
            prev_focus = crate::dom::document().and_then(|doc| {
                doc.active_element()
                    .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
            });

            container_ref.cast::<web_sys::Element>().and_then(|el| {
                el.query_selector(FOCUSABLE_QUERY)
                    .ok()
                    .flatten()
                    .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok())
            })
        } else {
            None
        };

        if let Some(first) = focus_target {
            let _ = first.focus();
        }
        move || {
            if let Some(el) = prev_focus {
                let _ = el.focus();
            }
        }
    });
}

/// Escape closes the panel from anywhere inside the widget.
pub fn escape_handler(open: bool, on_close: Callback<()>) -> Callback<KeyboardEvent> {
    Callback::from(move |e: KeyboardEvent| {
        if open && e.key() == "Escape" {
            e.prevent_default();
            on_close.emit(());
        }
    })
}
