use crate::i18n::{t, use_language};
use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    let _lang = use_language();
    html! {
        <footer class="site-footer">
            <p>{ t("nav.brand") }</p>
        </footer>
    }
}
