use crate::components::ui::{AccessibilityWidget, ChatPanel};
use crate::i18n::{t, use_language};
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

// Same corner and offset the embed script uses by default.
const WIDGET_DOCK_STYLE: &str = "position:fixed;bottom:24px;right:24px;z-index:999999;";
const CHAT_DOCK_STYLE: &str = "position:fixed;bottom:24px;right:96px;z-index:999998;";

/// Demo content that exercises every setting, plus the live widget.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let _lang = use_language();
    html! {
        <>
            <main id="main" class="demo">
                <section class="demo-hero">
                    <h1>{ t("demo.title") }</h1>
                    <p>{ t("demo.intro") }</p>
                </section>
                <section class="demo-sample" aria-labelledby="demo-sample-heading">
                    <h2 id="demo-sample-heading">{ t("demo.sample_heading") }</h2>
                    <p>{ t("demo.sample_body") }</p>
                    <p><Link<Route> to={Route::Embed}>{ t("demo.sample_link") }</Link<Route>></p>
                    <img
                        class="demo-image"
                        width="320"
                        height="120"
                        alt={t("demo.image_alt")}
                        src="data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='320' height='120'%3E%3Cdefs%3E%3ClinearGradient id='g'%3E%3Cstop offset='0' stop-color='%231d4ed8'/%3E%3Cstop offset='1' stop-color='%2300D9C0'/%3E%3C/linearGradient%3E%3C/defs%3E%3Crect width='320' height='120' rx='12' fill='url(%23g)'/%3E%3C/svg%3E"
                    />
                </section>
                <section class="demo-features" aria-labelledby="demo-features-heading">
                    <h2 id="demo-features-heading">{ t("demo.features_heading") }</h2>
                    <ul>
                        <li>{ t("demo.feature_text") }</li>
                        <li>{ t("demo.feature_reading") }</li>
                        <li>{ t("demo.feature_motion") }</li>
                        <li>{ t("demo.feature_outline") }</li>
                    </ul>
                </section>
            </main>
            <div style={CHAT_DOCK_STYLE}>
                <ChatPanel />
            </div>
            <div id="demo-widget" style={WIDGET_DOCK_STYLE}>
                <AccessibilityWidget />
            </div>
        </>
    }
}
