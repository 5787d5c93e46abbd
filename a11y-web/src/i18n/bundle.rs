use crate::i18n::locales::load_translations;
use a11y_core::{Language, LanguageSignal, Subscription};
use serde_json::Value;
use std::cell::RefCell;

pub struct I18nBundle {
    pub lang: Language,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: Language) -> I18nBundle {
    let empty = || Value::Object(serde_json::Map::new());
    let fallback = load_translations(Language::En).unwrap_or_else(empty);
    let translations = load_translations(lang).unwrap_or_else(|| fallback.clone());
    I18nBundle {
        lang,
        translations,
        fallback,
    }
}

fn saved_lang() -> Language {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        let attribute = crate::dom::root_element()
            .and_then(|root| root.get_attribute(a11y_core::LANGUAGE_ATTRIBUTE));
        let persisted = crate::dom::local_storage()
            .and_then(|storage| storage.get_item(a11y_core::LANGUAGE_KEY).ok().flatten());
        a11y_core::resolve_language(attribute.as_deref(), persisted.as_deref())
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        Language::default()
    }
}

thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> = RefCell::new(build_bundle(saved_lang()));

    // The page-wide signal; the bundle follows it for as long as the thread lives.
    static CHANNEL: (LanguageSignal, Subscription) = {
        let signal = LanguageSignal::new(current_lang());
        let sync = signal.subscribe(|lang| replace_bundle(build_bundle(lang)));
        (signal, sync)
    };
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

fn replace_bundle(bundle: I18nBundle) {
    CURRENT.with(|cell| cell.replace(bundle));
}

/// The language signal shared by every widget mounted in this page.
#[must_use]
pub fn signal() -> LanguageSignal {
    CHANNEL.with(|(signal, _)| signal.clone())
}

/// Switch the active translations and notify subscribers.
///
/// Persistence belongs to the widget controller; this only publishes.
pub fn set_lang(lang: Language) {
    signal().publish(lang);
}

#[must_use]
pub fn current_lang() -> Language {
    with_bundle(|bundle| bundle.lang)
}
