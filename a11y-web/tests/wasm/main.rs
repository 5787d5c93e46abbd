#![cfg(target_arch = "wasm32")]

mod effects_tests;
mod embed_tests;
mod widget_tests;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
