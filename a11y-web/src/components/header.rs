use crate::i18n::{t, use_language};
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    let _lang = use_language();
    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ t("demo.title") }</a>
            <nav aria-label={t("nav.brand")} class="header-content">
                <span class="brand">{ t("nav.brand") }</span>
                <ul class="nav-links">
                    <li><Link<Route> to={Route::Home}>{ t("nav.home") }</Link<Route>></li>
                    <li><Link<Route> to={Route::Embed}>{ t("nav.embed") }</Link<Route>></li>
                </ul>
            </nav>
        </header>
    }
}
