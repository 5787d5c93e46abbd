use crate::i18n::{t, use_language};
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Not-found page to show when routing fails to match a known view.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    let _lang = use_language();
    html! {
        <main id="main" class="panel not-found" aria-live="assertive">
            <h1>{ t("not_found.title") }</h1>
            <p>{ t("not_found.body") }</p>
            <Link<Route> to={Route::Home}>{ t("not_found.back") }</Link<Route>>
        </main>
    }
}
