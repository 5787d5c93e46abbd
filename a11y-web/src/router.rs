use crate::pages::{EmbedDocsPage, HomePage, NotFound};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/embed")]
    Embed,
    #[at("/404")]
    #[not_found]
    NotFound,
}

/// Map a matched route onto its page.
#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Embed => html! { <EmbedDocsPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
