//! Widget controller: owns the settings record and funnels every change
//! through persistence and the effector.

use crate::effects::{StyleEffector, StyleTarget};
use crate::language::Language;
use crate::settings::{Direction, Flag, Settings, SettingsPatch};
use crate::signal::{LANGUAGE_ATTRIBUTE, LanguageSignal};
use crate::storage::{KeyValueStore, PreferenceStore};

/// Panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelState {
    Closed,
    Open,
}

#[derive(Debug)]
pub struct WidgetController<S, T> {
    settings: Settings,
    language: Language,
    store: PreferenceStore<S>,
    target: T,
    effector: StyleEffector,
    signal: LanguageSignal,
}

impl<S: KeyValueStore, T: StyleTarget> WidgetController<S, T> {
    /// Build a controller with defaults overlaid by whatever was saved.
    ///
    /// Effects are applied only when a saved record exists, so a first visit
    /// leaves the host page untouched until the user changes something.
    pub fn mount(
        store: PreferenceStore<S>,
        target: T,
        effector: StyleEffector,
        signal: LanguageSignal,
    ) -> Self {
        let saved = store.load();
        let language = store.load_language().unwrap_or_default();
        let controller = Self {
            settings: saved.unwrap_or_default(),
            language,
            store,
            target,
            effector,
            signal,
        };
        if saved.is_some() {
            controller.reapply();
        }
        controller.broadcast_language();
        controller
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn panel(&self) -> PanelState {
        if self.settings.is_open {
            PanelState::Open
        } else {
            PanelState::Closed
        }
    }

    #[must_use]
    pub const fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn target(&self) -> &T {
        &self.target
    }

    #[must_use]
    pub const fn signal(&self) -> &LanguageSignal {
        &self.signal
    }

    /// The single mutation path: merge, store, persist, re-apply.
    pub fn update(&mut self, patch: &SettingsPatch) -> &Settings {
        self.settings.apply_patch(patch);
        if let Err(err) = self.store.save(&self.settings) {
            log::warn!("accessibility settings not saved: {err}");
        }
        self.reapply();
        &self.settings
    }

    pub fn toggle_open(&mut self) -> &Settings {
        let next = !self.settings.is_open;
        self.update(&SettingsPatch::open(next))
    }

    /// Step the text size; a step past either end changes nothing.
    pub fn adjust_font_size(&mut self, direction: Direction) -> &Settings {
        if !self.settings.can_step_font_size(direction) {
            return &self.settings;
        }
        let next = self.settings.stepped_font_size(direction);
        self.update(&SettingsPatch::font_size(next))
    }

    pub fn adjust_contrast(&mut self, direction: Direction) -> &Settings {
        if !self.settings.can_step_contrast(direction) {
            return &self.settings;
        }
        let next = self.settings.stepped_contrast(direction);
        self.update(&SettingsPatch::contrast(next))
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) -> &Settings {
        self.update(&SettingsPatch::with_flag(flag, value))
    }

    pub fn toggle_flag(&mut self, flag: Flag) -> &Settings {
        let next = !self.settings.flag(flag);
        self.set_flag(flag, next)
    }

    /// Restore every preference default; panel visibility is kept.
    pub fn reset(&mut self) -> &Settings {
        self.update(&SettingsPatch::reset())
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(err) = self.store.save_language(language) {
            log::warn!("language choice not saved: {err}");
        }
        self.broadcast_language();
    }

    fn reapply(&self) {
        self.effector.apply(&self.target, &self.settings);
    }

    fn broadcast_language(&self) {
        self.target
            .set_root_attribute(LANGUAGE_ATTRIBUTE, self.language.code());
        self.signal.publish(self.language);
    }
}
