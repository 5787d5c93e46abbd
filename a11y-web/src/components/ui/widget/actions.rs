use crate::i18n::{t, tr};
use a11y_core::{Direction, Flag, KeyValueStore, Language, StyleTarget, WidgetController};
use std::collections::BTreeMap;

/// Everything the panel can ask the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    TogglePanel,
    ClosePanel,
    FontSize(Direction),
    Contrast(Direction),
    ToggleFlag(Flag),
    Reset,
    Language(Language),
}

fn with_arg(key: &str, name: &str, value: &str) -> String {
    let mut args = BTreeMap::new();
    args.insert(name, value);
    tr(key, Some(&args))
}

/// Run `action` and return the text to announce in the live region.
pub fn apply_action<S: KeyValueStore, T: StyleTarget>(
    controller: &mut WidgetController<S, T>,
    action: WidgetAction,
) -> String {
    match action {
        WidgetAction::TogglePanel => {
            if controller.toggle_open().is_open {
                t("status.opened")
            } else {
                t("status.closed")
            }
        }
        WidgetAction::ClosePanel => {
            if controller.settings().is_open {
                controller.toggle_open();
            }
            t("status.closed")
        }
        WidgetAction::FontSize(direction) => {
            let value = controller.adjust_font_size(direction).font_size;
            with_arg("status.font_size", "value", &value.to_string())
        }
        WidgetAction::Contrast(direction) => {
            let value = controller.adjust_contrast(direction).contrast;
            with_arg("status.contrast", "value", &value.to_string())
        }
        WidgetAction::ToggleFlag(flag) => {
            let enabled = controller.toggle_flag(flag).flag(flag);
            let label = t(&format!("flags.{}", flag.key()));
            let key = if enabled {
                "status.flag_on"
            } else {
                "status.flag_off"
            };
            with_arg(key, "name", &label)
        }
        WidgetAction::Reset => {
            controller.reset();
            t("status.reset")
        }
        WidgetAction::Language(language) => {
            controller.set_language(language);
            with_arg("status.language", "name", language.native_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_core::{
        LanguageSignal, MemoryDocument, MemoryStore, PreferenceStore, SETTINGS_KEY, StyleEffector,
    };

    fn controller() -> (MemoryStore, WidgetController<MemoryStore, MemoryDocument>) {
        let store = MemoryStore::new();
        let controller = WidgetController::mount(
            PreferenceStore::new(store.clone()),
            MemoryDocument::new(),
            StyleEffector::default(),
            LanguageSignal::default(),
        );
        (store, controller)
    }

    #[test]
    fn font_steps_announce_the_new_value() {
        let (_, mut controller) = controller();
        let message = apply_action(&mut controller, WidgetAction::FontSize(Direction::Increase));
        assert_eq!(message, "Text size 110%");
        assert_eq!(
            controller.target().root_style("font-size").as_deref(),
            Some("110%")
        );
    }

    #[test]
    fn flag_toggle_announces_on_and_off() {
        let (_, mut controller) = controller();
        let on = apply_action(&mut controller, WidgetAction::ToggleFlag(Flag::DarkMode));
        let off = apply_action(&mut controller, WidgetAction::ToggleFlag(Flag::DarkMode));
        assert_eq!(on, "Dark Mode on");
        assert_eq!(off, "Dark Mode off");
    }

    #[test]
    fn close_is_idempotent() {
        let (store, mut controller) = controller();
        apply_action(&mut controller, WidgetAction::ClosePanel);
        assert!(store.get_item(SETTINGS_KEY).is_none());
        apply_action(&mut controller, WidgetAction::TogglePanel);
        apply_action(&mut controller, WidgetAction::ClosePanel);
        assert!(!controller.settings().is_open);
    }

    #[test]
    fn reset_keeps_the_panel_open() {
        let (_, mut controller) = controller();
        apply_action(&mut controller, WidgetAction::TogglePanel);
        apply_action(&mut controller, WidgetAction::Contrast(Direction::Increase));
        let message = apply_action(&mut controller, WidgetAction::Reset);
        assert_eq!(message, "Settings reset to default");
        assert_eq!(controller.settings().contrast, 100);
        assert!(controller.settings().is_open);
    }

    #[test]
    fn language_change_names_the_language() {
        let (_, mut controller) = controller();
        let message = apply_action(&mut controller, WidgetAction::Language(Language::Es));
        assert_eq!(message, "Language set to Español");
        assert_eq!(controller.language(), Language::Es);
    }
}
