mod bundle;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, set_lang, signal};
pub use locales::locales;
pub use render::{t, tr};

use a11y_core::Language;
use yew::prelude::*;

/// Current language, re-rendering the caller whenever it changes.
#[hook]
pub fn use_language() -> Language {
    let lang = use_state(current_lang);
    {
        let lang = lang.clone();
        use_effect_with((), move |()| {
            let subscription = signal().subscribe(move |next| lang.set(next));
            move || drop(subscription)
        });
    }
    *lang
}
