use super::actions::{WidgetAction, apply_action};
use super::focus::{escape_handler, use_focus_management};
use super::panel::{PANEL_ID, WidgetPanel};
use crate::a11y::{ensure_widget_styles, page_controller};
use crate::i18n::{self, t, use_language};
use yew::prelude::*;

/// Floating button plus settings panel, bound to this page's storage and
/// document. Every mounted instance shares the page-wide language signal.
#[function_component(AccessibilityWidget)]
pub fn accessibility_widget() -> Html {
    let language = use_language();
    let controller = use_mut_ref(|| page_controller(i18n::signal()));
    let settings = use_state(|| *controller.borrow().settings());
    let status = use_state(String::new);
    let panel_ref = use_node_ref();

    use_effect_with((), |()| ensure_widget_styles());
    use_focus_management(settings.is_open, panel_ref.clone());

    let dispatch = {
        let controller = controller.clone();
        let settings = settings.clone();
        let status = status.clone();
        Callback::from(move |action: WidgetAction| {
            let mut controller = controller.borrow_mut();
            let message = apply_action(&mut controller, action);
            settings.set(*controller.settings());
            status.set(message);
        })
    };

    let open = settings.is_open;
    let on_keydown = escape_handler(open, dispatch.reform(|()| WidgetAction::ClosePanel));
    let on_fab = dispatch.reform(|_: MouseEvent| WidgetAction::TogglePanel);
    let fab_label = if open {
        t("widget.close")
    } else {
        t("widget.open")
    };

    html! {
        <div class="a11y-widget" onkeydown={on_keydown}>
            <div class="sr-only" role="status" aria-live="polite">{ (*status).clone() }</div>
            if open {
                <WidgetPanel
                    settings={*settings}
                    {language}
                    on_action={dispatch.clone()}
                    panel_ref={panel_ref.clone()}
                />
            }
            <button
                type="button"
                class="a11y-fab"
                aria-label={fab_label}
                aria-expanded={if open { "true" } else { "false" }}
                aria-controls={PANEL_ID}
                onclick={on_fab}
            >
                <span aria-hidden="true">{ "♿" }</span>
            </button>
        </div>
    }
}
