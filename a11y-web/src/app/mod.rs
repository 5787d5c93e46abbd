use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::router::{Route, switch};
use yew::prelude::*;
use yew_router::prelude::*;

/// Demo site shell: header, routed page and footer.
#[function_component(AppShell)]
pub fn app_shell() -> Html {
    html! {
        <>
            <Header />
            <Switch<Route> render={switch} />
            <Footer />
        </>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::config::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppShell />
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::AppShell;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew::prelude::*;
    use yew_router::history::{AnyHistory, History, MemoryHistory};
    use yew_router::prelude::*;

    #[derive(Properties, PartialEq, Clone)]
    struct HarnessProps {
        path: AttrValue,
    }

    #[function_component(Harness)]
    fn harness(p: &HarnessProps) -> Html {
        let history = AnyHistory::from(MemoryHistory::new());
        history.push(p.path.to_string());
        html! {
            <Router history={history}>
                <AppShell />
            </Router>
        }
    }

    fn render(path: &str) -> String {
        let props = HarnessProps {
            path: AttrValue::from(path.to_string()),
        };
        block_on(LocalServerRenderer::<Harness>::with_props(props).render())
    }

    #[test]
    fn home_route_shows_demo_widget_and_chat() {
        let html = render("/");
        assert!(html.contains("Accessibility Widget Demo"));
        assert!(html.contains("Open accessibility options"));
        assert!(html.contains("Open AI chat"));
    }

    #[test]
    fn embed_route_shows_integration_guide() {
        let html = render("/embed");
        assert!(html.contains("Add the widget to your site"));
    }

    #[test]
    fn unknown_route_shows_not_found() {
        let html = render("/missing");
        assert!(html.contains("Page not found"));
    }
}
