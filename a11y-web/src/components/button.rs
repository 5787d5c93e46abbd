use yew::prelude::*;

/// Button whose visible content is a glyph; `label` becomes its accessible name.
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(IconButton)]
pub fn icon_button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    html! {
        <button
            type="button"
            class={classes!("a11y-icon-btn", p.class.clone())}
            aria-label={p.label.clone()}
            title={p.label.clone()}
            disabled={p.disabled}
            {onclick}
        >
            <span aria-hidden="true">{ p.children.clone() }</span>
        </button>
    }
}
