//! Durable persistence of the settings record and language choice.

use crate::error::StoreError;
use crate::language::Language;
use crate::settings::{Settings, SettingsPatch};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Storage key holding the JSON settings record.
pub const SETTINGS_KEY: &str = "accessibility-settings";
/// Storage key holding the plain language code.
pub const LANGUAGE_KEY: &str = "accessibility-language";

/// String key-value storage scoped to the browser profile.
pub trait KeyValueStore {
    /// Read an entry. Backend failures read as `None`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write an entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend refuses the write (quota, private mode).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same entries, so a test can keep a handle
/// after passing one into a controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the two persisted entries.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the saved record, overlaid onto the defaults.
    ///
    /// Returns `None` when nothing is saved or the entry cannot be parsed.
    #[must_use]
    pub fn load(&self) -> Option<Settings> {
        self.load_patch()
            .map(|patch| Settings::default().merged(&patch))
    }

    /// The raw saved shape, before it is merged onto anything.
    #[must_use]
    pub fn load_patch(&self) -> Option<SettingsPatch> {
        let raw = self.backend.get_item(SETTINGS_KEY)?;
        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(value @ Value::Object(_)) => value,
            Ok(other) => {
                log::debug!("ignoring saved settings that are not an object: {other}");
                return None;
            }
            Err(err) => {
                log::debug!("ignoring unreadable saved settings: {err}");
                return None;
            }
        };
        match serde_json::from_value::<SettingsPatch>(value) {
            Ok(patch) => Some(patch),
            Err(err) => {
                log::debug!("ignoring unreadable saved settings: {err}");
                None
            }
        }
    }

    /// Persist the full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or the write fails.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_string(settings)?;
        self.backend.set_item(SETTINGS_KEY, &json)
    }

    /// Load the saved language. Unknown codes are discarded.
    #[must_use]
    pub fn load_language(&self) -> Option<Language> {
        let raw = self.backend.get_item(LANGUAGE_KEY)?;
        let parsed = Language::from_code(&raw);
        if parsed.is_none() {
            log::debug!("ignoring unsupported saved language `{raw}`");
        }
        parsed
    }

    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_language(&self, language: Language) -> Result<(), StoreError> {
        self.backend.set_item(LANGUAGE_KEY, language.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Flag;

    #[test]
    fn load_returns_none_when_empty() {
        let store = PreferenceStore::new(MemoryStore::new());
        assert!(store.load().is_none());
        assert!(store.load_language().is_none());
    }

    #[test]
    fn malformed_record_reads_as_absent() {
        let store = PreferenceStore::new(MemoryStore::with_entry(SETTINGS_KEY, "{not json"));
        assert!(store.load().is_none());

        let wrong_type =
            PreferenceStore::new(MemoryStore::with_entry(SETTINGS_KEY, r#"{"fontSize":"big"}"#));
        assert!(wrong_type.load().is_none());
    }

    #[test]
    fn non_object_record_reads_as_absent() {
        for raw in ["[]", "[true, 130]", "null", "42", r#""es""#] {
            let store = PreferenceStore::new(MemoryStore::with_entry(SETTINGS_KEY, raw));
            assert!(store.load().is_none(), "{raw} should not load");
        }
    }

    #[test]
    fn huge_numbers_clamp_without_losing_the_record() {
        let store = PreferenceStore::new(MemoryStore::with_entry(
            SETTINGS_KEY,
            r#"{"fontSize":5000000000,"contrast":-5000000000,"darkMode":true}"#,
        ));
        let loaded = store.load().expect("record loads");
        assert_eq!(loaded.font_size, 150);
        assert_eq!(loaded.contrast, 50);
        assert!(loaded.dark_mode);
    }

    #[test]
    fn older_record_is_merged_onto_defaults() {
        let store = PreferenceStore::new(MemoryStore::with_entry(
            SETTINGS_KEY,
            r#"{"fontSize":120,"dyslexicFont":true,"somethingElse":1}"#,
        ));
        let loaded = store.load().expect("record loads");
        assert_eq!(loaded.font_size, 120);
        assert!(loaded.dyslexic_font);
        assert_eq!(loaded.contrast, 100);
        assert!(!loaded.flag(Flag::PageStructure));
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = PreferenceStore::new(MemoryStore::new());
        let settings = Settings {
            is_open: true,
            font_size: 80,
            contrast: 200,
            text_spacing: true,
            ..Settings::default()
        };
        store.save(&settings).expect("save");
        assert_eq!(store.load(), Some(settings));
    }

    #[test]
    fn unknown_language_is_discarded() {
        let store = PreferenceStore::new(MemoryStore::with_entry(LANGUAGE_KEY, "fr"));
        assert_eq!(store.load_language(), None);
        let padded = PreferenceStore::new(MemoryStore::with_entry(LANGUAGE_KEY, " es "));
        assert_eq!(padded.load_language(), None);
        store.save_language(Language::Es).expect("save");
        assert_eq!(store.load_language(), Some(Language::Es));
        assert_eq!(store.backend().get_item(LANGUAGE_KEY).as_deref(), Some("es"));
    }
}
