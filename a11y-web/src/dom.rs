use js_sys::{Function, Promise};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Request, RequestInit, Response, Storage, Window};

/// The global `window`, when running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// The `<html>` element.
#[must_use]
pub fn root_element() -> Option<Element> {
    document().and_then(|doc| doc.document_element())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Log a warning to the browser console.
pub fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from(message));
}

/// Access `localStorage`; `None` when storage is blocked or absent.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    window().and_then(|win| win.local_storage().ok().flatten())
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        duration_ms,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Outcome of a JSON POST that reached the server.
#[derive(Debug)]
pub enum JsonReply<T> {
    Ok(T),
    Status(u16),
    /// The body was JSON but not the expected shape.
    Malformed(String),
}

/// POST `body` as JSON to `url` and decode the JSON reply.
///
/// Non-2xx responses come back as [`JsonReply::Status`] rather than an error
/// so callers can tell a reachable-but-failing service from a network error.
///
/// # Errors
/// Returns an error if the request cannot be built or sent, or the body is not JSON.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn post_json<B, T>(url: &str, body: &B) -> Result<JsonReply<T>, JsValue>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let payload = serde_json::to_string(body).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&payload));
    let request = Request::new_with_str_and_init(url, &init)?;
    request.headers().set("Content-Type", "application/json")?;

    let resp_value = JsFuture::from(win.fetch_with_request(&request)).await?;
    let response: Response = resp_value.dyn_into()?;
    if !response.ok() {
        return Ok(JsonReply::Status(response.status()));
    }
    let json = JsFuture::from(response.json()?).await?;
    Ok(match serde_wasm_bindgen::from_value(json) {
        Ok(decoded) => JsonReply::Ok(decoded),
        Err(err) => JsonReply::Malformed(err.to_string()),
    })
}

/// Write `text` to the system clipboard; failures are ignored.
pub fn copy_to_clipboard(text: &str) {
    if let Some(win) = window() {
        let _ = win.navigator().clipboard().write_text(text);
    }
}
