use a11y_core::Language;
use once_cell::sync::Lazy;
use serde_json::Value;

const LOCALE_TABLE: &[(Language, &str)] = &[
    (Language::En, include_str!("../../i18n/en.json")),
    (Language::Es, include_str!("../../i18n/es.json")),
];

/// Languages offered in the picker, in display order.
#[must_use]
pub const fn locales() -> &'static [Language] {
    &Language::ALL
}

// Parsed once; a locale file that fails to parse is left out and the
// lookup falls back to English.
static PARSED: Lazy<Vec<(Language, Value)>> = Lazy::new(|| {
    LOCALE_TABLE
        .iter()
        .filter_map(|(lang, data)| match serde_json::from_str(data) {
            Ok(value) => Some((*lang, value)),
            Err(err) => {
                log::error!("translations for {lang} are not valid JSON: {err}");
                None
            }
        })
        .collect()
});

pub fn load_translations(lang: Language) -> Option<Value> {
    PARSED
        .iter()
        .find(|(code, _)| *code == lang)
        .or_else(|| PARSED.first())
        .map(|(_, value)| value.clone())
}
