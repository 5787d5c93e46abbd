//! Standalone script entry points: `window.SkillblendA11y.init/destroy` and
//! auto-init from the script tag.

use crate::components::ui::AccessibilityWidget;
use crate::dom;
use a11y_core::embed::{AUTO_INIT_ATTRIBUTE, CONTAINER_ID};
use a11y_core::{
    AutoInit, EmbedHost, EmbedOptions, QueuedCall, ReadyState, WidgetMounter, auto_init_plan,
    queued_calls,
};
use serde_json::Value;
use std::cell::RefCell;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::AppHandle;

/// Property installed on `window`.
pub const GLOBAL_NAME: &str = "SkillblendA11y";

/// Inline stand-in for the API so pages can call it before the script has
/// loaded. Calls are recorded in `q` and replayed by [`install_global_api`].
pub const PLACEHOLDER_SCRIPT: &str = "window.SkillblendA11y = window.SkillblendA11y || { q: [], init: function (o) { this.q.push(['init', o]); }, destroy: function () { this.q.push(['destroy']); } };";

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no document is available")]
    NoDocument,
    #[error("the document has no body")]
    NoBody,
    #[error("could not create the widget container: {0}")]
    Dom(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        Self::Dom(dom::js_error_message(&value))
    }
}

pub struct MountedWidget {
    handle: AppHandle<AccessibilityWidget>,
    container: Element,
}

/// Renders the widget into a fixed container appended to `<body>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YewMounter;

impl WidgetMounter for YewMounter {
    type Mounted = MountedWidget;
    type Error = MountError;

    fn mount(&mut self, options: &EmbedOptions) -> Result<MountedWidget, MountError> {
        let doc = dom::document().ok_or(MountError::NoDocument)?;
        let body = doc.body().ok_or(MountError::NoBody)?;
        let container = doc.create_element("div")?;
        container.set_id(CONTAINER_ID);
        container.set_attribute("style", &container_style(options))?;
        body.append_child(&container)?;
        let handle = yew::Renderer::<AccessibilityWidget>::with_root(container.clone()).render();
        Ok(MountedWidget { handle, container })
    }

    fn unmount(&mut self, mounted: MountedWidget) {
        mounted.handle.destroy();
        mounted.container.remove();
    }
}

/// Inline `style` attribute for the container.
#[must_use]
pub fn container_style(options: &EmbedOptions) -> String {
    options
        .container_styles()
        .iter()
        .map(|(property, value)| format!("{property}:{value};"))
        .collect()
}

thread_local! {
    static HOST: RefCell<EmbedHost<YewMounter>> = RefCell::new(EmbedHost::new(YewMounter));
}

/// Mount the widget once. Returns whether this call mounted it.
pub fn init(options: EmbedOptions) -> bool {
    HOST.with(|host| match host.borrow_mut().init(options) {
        Ok(mounted) => mounted,
        Err(err) => {
            dom::console_error(&format!("accessibility widget failed to mount: {err}"));
            false
        }
    })
}

/// Parse the untyped options object handed to `init` from JavaScript.
///
/// Anything unusable is reported on the console and replaced by defaults.
pub fn options_from_js(options: &JsValue) -> EmbedOptions {
    let value = if options.is_undefined() || options.is_null() {
        Value::Null
    } else {
        serde_wasm_bindgen::from_value(options.clone()).unwrap_or_else(|err| {
            log::warn!("{GLOBAL_NAME}.init options ignored: {err}");
            Value::Null
        })
    };
    options_from_value(&value)
}

fn options_from_value(value: &Value) -> EmbedOptions {
    let (parsed, problems) = EmbedOptions::from_value(value);
    for problem in problems {
        dom::console_warn(&format!("{GLOBAL_NAME}.init: {problem}"));
    }
    parsed
}

/// Unmount the widget and remove its container. Returns whether one existed.
pub fn destroy() -> bool {
    HOST.with(|host| host.borrow_mut().destroy())
}

#[must_use]
pub fn is_mounted() -> bool {
    HOST.with(|host| host.borrow().is_mounted())
}

#[wasm_bindgen(js_name = initWidget)]
pub fn init_widget(options: JsValue) {
    init(options_from_js(&options));
}

#[wasm_bindgen(js_name = destroyWidget)]
pub fn destroy_widget() {
    destroy();
}

/// Calls collected by [`PLACEHOLDER_SCRIPT`], if the page installed it.
fn take_queued_calls(window: &web_sys::Window) -> Vec<QueuedCall> {
    let Ok(existing) = js_sys::Reflect::get(window, &JsValue::from_str(GLOBAL_NAME)) else {
        return Vec::new();
    };
    if !existing.is_object() {
        return Vec::new();
    }
    let queue = js_sys::Reflect::get(&existing, &JsValue::from_str("q")).unwrap_or_default();
    if !js_sys::Array::is_array(&queue) {
        return Vec::new();
    }
    match serde_wasm_bindgen::from_value::<Value>(queue) {
        Ok(value) => queued_calls(&value),
        Err(err) => {
            dom::console_warn(&format!("{GLOBAL_NAME}: queued calls ignored: {err}"));
            Vec::new()
        }
    }
}

fn replay(calls: Vec<QueuedCall>) {
    for call in calls {
        match call {
            QueuedCall::Init(options) => {
                init(options_from_value(&options));
            }
            QueuedCall::Destroy => {
                destroy();
            }
        }
    }
}

/// Attach `{ init, destroy }` to `window` under [`GLOBAL_NAME`], then replay
/// anything queued on the placeholder once the document is ready.
pub fn install_global_api() {
    let Some(window) = dom::window() else {
        return;
    };
    let queued = take_queued_calls(&window);
    let init_fn = Closure::<dyn Fn(JsValue)>::new(|options: JsValue| {
        init(options_from_js(&options));
    });
    let destroy_fn = Closure::<dyn Fn()>::new(|| {
        destroy();
    });

    let api = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&api, &JsValue::from_str("init"), init_fn.as_ref().unchecked_ref());
    let _ = js_sys::Reflect::set(
        &api,
        &JsValue::from_str("destroy"),
        destroy_fn.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &api);
    // The API lives as long as the page.
    init_fn.forget();
    destroy_fn.forget();

    if !queued.is_empty() {
        log::debug!("{GLOBAL_NAME}: replaying {} queued call(s)", queued.len());
        when_dom_ready(move || replay(queued));
    }
}

fn script_opt_out() -> Option<String> {
    let doc = dom::document()?;
    // `currentScript` is already cleared when the module instantiates
    // asynchronously, so fall back to the first tagged script.
    let script = doc.current_script().map(Element::from).or_else(|| {
        doc.query_selector(&format!("script[{AUTO_INIT_ATTRIBUTE}]"))
            .ok()
            .flatten()
    })?;
    script.get_attribute(AUTO_INIT_ATTRIBUTE)
}

fn ready_state() -> ReadyState {
    match dom::document().map(|doc| doc.ready_state()).as_deref() {
        Some("loading") => ReadyState::Loading,
        Some("interactive") => ReadyState::Interactive,
        _ => ReadyState::Complete,
    }
}

fn when_dom_ready<F: FnOnce() + 'static>(f: F) {
    if ready_state() != ReadyState::Loading {
        f();
        return;
    }
    let Some(doc) = dom::document() else {
        return;
    };
    let on_ready = Closure::once_into_js(f);
    let _ = doc.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
}

/// Mount with default options unless the script tag opted out.
pub fn auto_init() {
    match auto_init_plan(script_opt_out().as_deref(), ready_state()) {
        AutoInit::Skip => log::debug!("{GLOBAL_NAME} auto-init disabled by script tag"),
        AutoInit::Now | AutoInit::OnDomReady => when_dom_ready(|| {
            init(EmbedOptions::default());
        }),
    }
}
