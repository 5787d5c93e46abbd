use a11y_web::components::ui::AccessibilityWidget;
use a11y_web::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

fn ensure_root(id: &str) -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id(id) {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create root");
    root.set_id(id);
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append root");
    root
}

async fn settle() {
    dom::sleep_ms(30).await.expect("timer");
}

#[wasm_bindgen_test]
async fn fab_opens_panel_and_toggles_reach_the_document() {
    let root = ensure_root("widget-test-root");
    let _handle = Renderer::<AccessibilityWidget>::with_root(root.clone()).render();
    settle().await;

    let fab: HtmlElement = root
        .query_selector(".a11y-fab")
        .expect("query")
        .expect("fab rendered")
        .dyn_into()
        .expect("html element");
    fab.click();
    settle().await;
    assert_eq!(fab.get_attribute("aria-expanded").as_deref(), Some("true"));

    let hide_images: HtmlElement = root
        .query_selector("#a11y-flag-hideImages")
        .expect("query")
        .expect("switch rendered")
        .dyn_into()
        .expect("html element");
    hide_images.click();
    settle().await;
    let doc = dom::document().expect("document");
    assert!(doc.get_element_by_id("a11y-hide-images").is_some());

    hide_images.click();
    settle().await;
    assert!(doc.get_element_by_id("a11y-hide-images").is_none());
}
