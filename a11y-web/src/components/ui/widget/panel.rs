use super::actions::WidgetAction;
use crate::components::ui::{Stepper, SwitchRow};
use crate::i18n::{self, t};
use a11y_core::{Direction, Flag, Language, Settings};
use wasm_bindgen::JsCast;
use yew::prelude::*;

pub const PANEL_ID: &str = "a11y-panel";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub settings: Settings,
    pub language: Language,
    pub on_action: Callback<WidgetAction>,
    #[prop_or_default]
    pub panel_ref: NodeRef,
}

#[function_component(WidgetPanel)]
pub fn widget_panel(p: &Props) -> Html {
    let s = p.settings;
    let on_close = p.on_action.reform(|_: MouseEvent| WidgetAction::ClosePanel);
    let on_reset = p.on_action.reform(|_: MouseEvent| WidgetAction::Reset);
    let on_language = {
        let cb = p.on_action.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(WidgetAction::Language(Language::from_code_or_default(
                    &sel.value(),
                )));
            }
        })
    };

    let switches: Html = Flag::ALL
        .into_iter()
        .map(|flag| {
            let key = flag.key();
            html! {
                <SwitchRow
                    key={key}
                    id={format!("a11y-flag-{key}")}
                    label={t(&format!("flags.{key}"))}
                    checked={s.flag(flag)}
                    on_toggle={p.on_action.reform(move |()| WidgetAction::ToggleFlag(flag))}
                />
            }
        })
        .collect();

    let languages: Html = i18n::locales()
        .iter()
        .map(|lang| {
            html! {
                <option value={lang.code()} selected={*lang == p.language}>
                    { lang.native_name() }
                </option>
            }
        })
        .collect();

    html! {
        <div
            id={PANEL_ID}
            class="a11y-panel"
            role="dialog"
            aria-labelledby="a11y-panel-title"
            ref={p.panel_ref.clone()}
        >
            <div class="a11y-panel__header">
                <h2 id="a11y-panel-title">{ t("widget.title") }</h2>
                <button
                    type="button"
                    class="a11y-icon-btn"
                    aria-label={t("widget.close_panel")}
                    onclick={on_close}
                >
                    <span aria-hidden="true">{ "×" }</span>
                </button>
            </div>
            <Stepper
                id="a11y-font-size"
                label={t("widget.text_size")}
                value={s.font_size}
                decrease_label={t("widget.text_size_decrease")}
                increase_label={t("widget.text_size_increase")}
                can_decrease={s.can_step_font_size(Direction::Decrease)}
                can_increase={s.can_step_font_size(Direction::Increase)}
                on_step={p.on_action.reform(WidgetAction::FontSize)}
            />
            <Stepper
                id="a11y-contrast"
                label={t("widget.contrast")}
                value={s.contrast}
                decrease_label={t("widget.contrast_decrease")}
                increase_label={t("widget.contrast_increase")}
                can_decrease={s.can_step_contrast(Direction::Decrease)}
                can_increase={s.can_step_contrast(Direction::Increase)}
                on_step={p.on_action.reform(WidgetAction::Contrast)}
            />
            { switches }
            <div class="a11y-row">
                <label for="a11y-language">{ t("widget.language") }</label>
                <select id="a11y-language" onchange={on_language}>
                    { languages }
                </select>
            </div>
            <button type="button" class="a11y-reset" onclick={on_reset}>
                { t("widget.reset") }
            </button>
        </div>
    }
}
