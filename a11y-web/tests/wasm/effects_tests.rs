use a11y_core::{Flag, Settings, StyleEffector, StyleTarget};
use a11y_web::a11y::{WebDocument, WebStorage};
use a11y_web::dom;
use a11y_core::{KeyValueStore, LANGUAGE_ATTRIBUTE};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

fn root_style(property: &str) -> String {
    dom::root_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .and_then(|el| el.style().get_property_value(property).ok())
        .unwrap_or_default()
}

fn count(selector: &str) -> u32 {
    dom::document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map_or(0, |list| list.length())
}

#[wasm_bindgen_test]
fn effector_writes_and_clears_the_real_document() {
    let effector = StyleEffector::default();
    let mut settings = Settings {
        font_size: 120,
        contrast: 150,
        dyslexic_font: true,
        highlight_links: true,
        dark_mode: true,
        ..Settings::default()
    };
    effector.apply(&WebDocument, &settings);
    effector.apply(&WebDocument, &settings);

    assert_eq!(root_style("font-size"), "120%");
    assert_eq!(root_style("filter"), "contrast(150%)");
    assert_eq!(count("#opendyslexic-font"), 1);
    assert_eq!(count("#a11y-highlight-links"), 1);
    let root = dom::root_element().expect("html element");
    assert!(root.class_list().contains("dark"));

    settings = Settings::default();
    effector.apply(&WebDocument, &settings);
    assert_eq!(root_style("font-size"), "100%");
    assert_eq!(count("#a11y-highlight-links"), 0);
    assert!(!root.class_list().contains("dark"));
    assert!(!settings.flag(Flag::DyslexicFont));
}

#[wasm_bindgen_test]
fn root_attribute_and_storage_round_trip() {
    WebDocument.set_root_attribute(LANGUAGE_ATTRIBUTE, "es");
    let root = dom::root_element().expect("html element");
    assert_eq!(root.get_attribute(LANGUAGE_ATTRIBUTE).as_deref(), Some("es"));

    WebStorage
        .set_item("a11y-test-key", "value")
        .expect("localStorage writable in test browser");
    assert_eq!(WebStorage.get_item("a11y-test-key").as_deref(), Some("value"));
}
