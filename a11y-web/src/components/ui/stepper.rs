use crate::components::button::IconButton;
use a11y_core::Direction;
use yew::prelude::*;

/// Labelled percentage readout with decrease/increase buttons.
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: u16,
    pub decrease_label: AttrValue,
    pub increase_label: AttrValue,
    pub can_decrease: bool,
    pub can_increase: bool,
    pub on_step: Callback<Direction>,
}

#[function_component(Stepper)]
pub fn stepper(p: &Props) -> Html {
    let step = |direction: Direction| {
        let cb = p.on_step.clone();
        Callback::from(move |_: MouseEvent| cb.emit(direction))
    };
    let label_id = format!("{}-label", p.id);
    html! {
        <div class="a11y-row" role="group" aria-labelledby={label_id.clone()}>
            <span id={label_id}>{ p.label.clone() }</span>
            <div class="a11y-stepper">
                <IconButton
                    label={p.decrease_label.clone()}
                    disabled={!p.can_decrease}
                    onclick={step(Direction::Decrease)}
                >
                    { "−" }
                </IconButton>
                <output id={p.id.clone()} aria-live="off">{ format!("{}%", p.value) }</output>
                <IconButton
                    label={p.increase_label.clone()}
                    disabled={!p.can_increase}
                    onclick={step(Direction::Increase)}
                >
                    { "+" }
                </IconButton>
            </div>
        </div>
    }
}
