use a11y_core::{APOLOGY, ChatState, Language, Settings};
use a11y_web::components::button::{self, IconButton};
use a11y_web::components::ui::chat_panel::{self, ChatPanel};
use a11y_web::components::ui::widget::{PanelProps, WidgetPanel};
use a11y_web::components::ui::AccessibilityWidget;
use a11y_web::pages::EmbedDocsPage;
use futures::executor::block_on;
use yew::{AttrValue, Callback, Classes, LocalServerRenderer, NodeRef, html};

#[test]
fn icon_button_keeps_glyph_out_of_the_accessible_name() {
    let props = button::Props {
        label: AttrValue::from("Close accessibility panel"),
        children: html! { "×" },
        class: Classes::new(),
        disabled: false,
        onclick: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<IconButton>::with_props(props).render());
    assert!(html.contains("aria-label=\"Close accessibility panel\""));
    assert!(html.contains("aria-hidden=\"true\""));
    assert!(html.contains('×'));
}

#[test]
fn widget_fab_is_labelled_and_collapsed() {
    let html = block_on(LocalServerRenderer::<AccessibilityWidget>::new().render());
    assert!(html.contains("a11y-fab"));
    assert!(html.contains("aria-controls=\"a11y-panel\""));
    assert!(html.contains("aria-expanded=\"false\""));
    assert!(html.contains("role=\"status\""));
}

#[test]
fn spanish_panel_uses_spanish_labels() {
    a11y_web::i18n::set_lang(Language::Es);
    let props = PanelProps {
        settings: Settings::default(),
        language: Language::Es,
        on_action: Callback::noop(),
        panel_ref: NodeRef::default(),
    };
    let html = block_on(LocalServerRenderer::<WidgetPanel>::with_props(props).render());
    a11y_web::i18n::set_lang(Language::En);
    assert!(html.contains("Tamaño del texto"));
    assert!(html.contains("Modo oscuro"));
    assert!(html.contains("Restablecer valores"));
}

#[test]
fn chat_panel_shows_apology_after_failure() {
    let props = chat_panel::Props {
        initial: ChatState {
            open: true,
            response: Some(APOLOGY.to_string()),
            ..ChatState::default()
        },
    };
    let html = block_on(LocalServerRenderer::<ChatPanel>::with_props(props).render());
    assert!(html.contains(APOLOGY));
    assert!(html.contains("Ask a question..."));
}

#[test]
fn embed_docs_show_local_snippets_by_default() {
    let html = block_on(LocalServerRenderer::<EmbedDocsPage>::new().render());
    assert!(html.contains("/widget.js"));
    assert!(html.contains("Manual initialization"));
    assert!(html.contains("Copy"));
}
