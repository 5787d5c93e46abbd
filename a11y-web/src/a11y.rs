// Browser bindings for the accessibility core

use a11y_core::{
    KeyValueStore, LanguageSignal, PreferenceStore, StoreError, StyleEffector, StyleTarget,
    WidgetController,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom;

/// Id of the `<style>` element carrying the widget's own chrome.
pub const WIDGET_STYLE_ID: &str = "a11y-widget-styles";

/// Styles for the floating button and panels, plus focus rings and the
/// screen-reader-only helper. Injected once per page.
#[must_use]
pub const fn widget_css() -> &'static str {
    concat!(
        ".a11y-fab{width:56px;height:56px;border-radius:9999px;border:none;background:#1d4ed8;color:#fff;font-size:28px;cursor:pointer;box-shadow:0 8px 24px rgba(15,23,42,.25)}",
        ".a11y-fab:hover{transform:scale(1.05)}",
        ".a11y-chat-fab{width:48px;height:48px;font-size:22px}",
        ".a11y-panel{position:absolute;bottom:72px;right:0;width:320px;max-height:70vh;overflow-y:auto;background:#fff;color:#0f172a;border:1px solid #cbd5e1;border-radius:12px;padding:20px;box-shadow:0 12px 32px rgba(15,23,42,.2);font-family:system-ui,sans-serif;font-size:16px;line-height:1.4}",
        "html.dark .a11y-panel{background:#0f172a;color:#f8fafc;border-color:#334155}",
        ".a11y-panel__header{display:flex;align-items:center;justify-content:space-between;margin-bottom:16px}",
        ".a11y-panel__header h2{margin:0;font-size:18px}",
        ".a11y-row{display:flex;align-items:center;justify-content:space-between;gap:8px;padding:8px 0;border-bottom:1px solid #e2e8f0}",
        ".a11y-stepper{display:flex;align-items:center;gap:8px}",
        ".a11y-stepper output{min-width:3rem;text-align:center}",
        ".a11y-icon-btn{width:32px;height:32px;border-radius:6px;border:1px solid #94a3b8;background:transparent;color:inherit;cursor:pointer}",
        ".a11y-icon-btn:disabled{opacity:.4;cursor:not-allowed}",
        ".a11y-reset{width:100%;margin-top:16px;padding:8px;border-radius:6px;border:1px solid #94a3b8;background:transparent;color:inherit;cursor:pointer}",
        ".a11y-chat__response{margin-top:12px;padding:12px;border-radius:6px;background:#f1f5f9;max-height:10rem;overflow-y:auto}",
        ".a11y-spinner{display:inline-block;width:14px;height:14px;border:2px solid currentColor;border-top-color:transparent;border-radius:50%;animation:a11y-spin 1s linear infinite}",
        "@keyframes a11y-spin{to{transform:rotate(360deg)}}",
        ".a11y-panel :focus,.a11y-fab:focus{outline:3px solid #00D9C0;outline-offset:2px}",
        ".sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
    )
}

/// [`StyleTarget`] over the live page document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebDocument;

fn root_html() -> Option<HtmlElement> {
    dom::root_element().and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn head_append(node: &Element) {
    let Some(head) = dom::document().and_then(|doc| doc.head()) else {
        return;
    };
    let _ = head.append_child(node);
}

impl StyleTarget for WebDocument {
    fn set_root_style(&self, property: &str, value: Option<&str>) {
        let Some(root) = root_html() else {
            return;
        };
        let style = root.style();
        let _ = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        if let Some(root) = dom::root_element() {
            let _ = if enabled {
                root.class_list().add_1(class)
            } else {
                root.class_list().remove_1(class)
            };
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = dom::root_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn has_node(&self, id: &str) -> bool {
        dom::document()
            .and_then(|doc| doc.get_element_by_id(id))
            .is_some()
    }

    fn insert_stylesheet_link(&self, id: &str, href: &str) {
        let Some(doc) = dom::document() else {
            return;
        };
        let Ok(link) = doc.create_element("link") else {
            return;
        };
        link.set_id(id);
        let _ = link.set_attribute("rel", "stylesheet");
        let _ = link.set_attribute("href", href);
        head_append(&link);
    }

    fn upsert_style(&self, id: &str, css: &str) {
        let Some(doc) = dom::document() else {
            return;
        };
        let node = match doc.get_element_by_id(id) {
            Some(existing) => existing,
            None => {
                let Ok(created) = doc.create_element("style") else {
                    return;
                };
                created.set_id(id);
                head_append(&created);
                created
            }
        };
        node.set_text_content(Some(css));
    }

    fn remove_node(&self, id: &str) {
        if let Some(node) = dom::document().and_then(|doc| doc.get_element_by_id(id)) {
            node.remove();
        }
    }
}

/// [`KeyValueStore`] over `localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebStorage;

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage =
            dom::local_storage().ok_or_else(|| StoreError::Unavailable("localStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write {
                key: key.to_string(),
                reason: dom::js_error_message(&err),
            })
    }
}

// Server-side rendering and native tests never touch the browser.
#[cfg(target_arch = "wasm32")]
pub type PageStore = WebStorage;
#[cfg(target_arch = "wasm32")]
pub type PageDocument = WebDocument;
#[cfg(not(target_arch = "wasm32"))]
pub type PageStore = a11y_core::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PageDocument = a11y_core::MemoryDocument;

pub type PageController = WidgetController<PageStore, PageDocument>;

/// Mount a controller bound to this page's storage and document.
#[must_use]
pub fn page_controller(signal: LanguageSignal) -> PageController {
    WidgetController::mount(
        PreferenceStore::new(PageStore::default()),
        PageDocument::default(),
        StyleEffector::new(crate::config::font_css_url()),
        signal,
    )
}

/// Inject the widget chrome styles if no earlier mount did.
pub fn ensure_widget_styles() {
    let doc = PageDocument::default();
    if !doc.has_node(WIDGET_STYLE_ID) {
        doc.upsert_style(WIDGET_STYLE_ID, widget_css());
    }
}
