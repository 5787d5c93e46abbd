use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub id: AttrValue,
    pub label: AttrValue,
    pub checked: bool,
    pub on_toggle: Callback<()>,
}

/// A checkbox exposed as a switch, one per boolean preference.
#[function_component(SwitchRow)]
pub fn switch_row(p: &Props) -> Html {
    let onchange = {
        let cb = p.on_toggle.clone();
        Callback::from(move |_: Event| cb.emit(()))
    };
    html! {
        <div class="a11y-row">
            <label for={p.id.clone()}>{ p.label.clone() }</label>
            <input
                id={p.id.clone()}
                type="checkbox"
                role="switch"
                aria-checked={if p.checked { "true" } else { "false" }}
                checked={p.checked}
                {onchange}
            />
        </div>
    }
}
