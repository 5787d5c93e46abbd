use a11y_core::{EmbedOptions, Position};
use a11y_core::embed::CONTAINER_ID;
use a11y_web::{dom, embed};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn containers() -> u32 {
    dom::document()
        .and_then(|doc| doc.query_selector_all(&format!("#{CONTAINER_ID}")).ok())
        .map_or(0, |list| list.length())
}

#[wasm_bindgen_test]
fn init_twice_mounts_one_container_and_destroy_removes_it() {
    embed::destroy();
    let options = EmbedOptions {
        position: Position::TopLeft,
        ..EmbedOptions::default()
    };
    assert!(embed::init(options));
    assert!(!embed::init(EmbedOptions::default()));
    assert_eq!(containers(), 1);

    let style = dom::document()
        .and_then(|doc| doc.get_element_by_id(CONTAINER_ID))
        .and_then(|el| el.get_attribute("style"))
        .unwrap_or_default();
    assert!(style.contains("top:24px"));
    assert!(style.contains("left:24px"));

    assert!(embed::destroy());
    assert_eq!(containers(), 0);
    assert!(!embed::destroy());
}

#[wasm_bindgen_test]
fn global_api_is_installed_on_window() {
    embed::install_global_api();
    let window = dom::window().expect("window");
    let api = js_sys::Reflect::get(&window, &JsValue::from_str(embed::GLOBAL_NAME))
        .expect("api present");
    let init = js_sys::Reflect::get(&api, &JsValue::from_str("init")).expect("init present");
    let destroy =
        js_sys::Reflect::get(&api, &JsValue::from_str("destroy")).expect("destroy present");
    assert!(init.is_function());
    assert!(destroy.is_function());
}

#[wasm_bindgen_test]
fn bad_options_fall_back_to_defaults() {
    let raw = js_sys::JSON::parse(r#"{"position":"middle","colour":"red"}"#).expect("json");
    assert_eq!(embed::options_from_js(&raw), EmbedOptions::default());
    assert_eq!(embed::options_from_js(&JsValue::UNDEFINED), EmbedOptions::default());
}

#[wasm_bindgen_test]
fn calls_made_before_start_are_replayed() {
    embed::destroy();
    let window = dom::window().expect("window");
    js_sys::Reflect::delete_property(&window, &JsValue::from_str(embed::GLOBAL_NAME))
        .expect("clear global");

    js_sys::eval(embed::PLACEHOLDER_SCRIPT).expect("placeholder installs");
    js_sys::eval("window.SkillblendA11y.init({ position: 'top-right' });").expect("queued init");
    assert_eq!(containers(), 0);

    embed::install_global_api();
    assert!(embed::is_mounted());
    assert_eq!(containers(), 1);
    let style = dom::document()
        .and_then(|doc| doc.get_element_by_id(CONTAINER_ID))
        .and_then(|el| el.get_attribute("style"))
        .unwrap_or_default();
    assert!(style.contains("top:24px"));
    assert!(style.contains("right:24px"));

    js_sys::eval("window.SkillblendA11y.destroy();").expect("real destroy");
    assert_eq!(containers(), 0);
}

#[wasm_bindgen_test]
fn placeholder_defers_to_an_installed_api() {
    embed::destroy();
    embed::install_global_api();
    js_sys::eval(embed::PLACEHOLDER_SCRIPT).expect("placeholder is a no-op");
    js_sys::eval("window.SkillblendA11y.init();").expect("direct init");
    assert_eq!(containers(), 1);
    assert!(embed::destroy());
}
