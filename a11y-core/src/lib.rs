//! Skillblend accessibility widget core
//!
//! Platform-agnostic preference model: the settings record, its persistence,
//! the style effector, the language signal, the widget controller, the
//! embedding lifecycle and chat panel state. Browser bindings live in
//! `a11y-web`; everything here runs natively for tests and tooling.

pub mod chat;
pub mod controller;
pub mod effects;
pub mod embed;
pub mod error;
pub mod language;
pub mod settings;
pub mod signal;
pub mod storage;

pub use chat::{APOLOGY, ChatError, ChatRequest, ChatResponse, ChatState};
pub use controller::{PanelState, WidgetController};
pub use effects::{
    DocumentSnapshot, ManagedNode, MemoryDocument, STYLE_RULES, StyleEffector, StyleRule,
    StyleTarget,
};
pub use embed::{
    AutoInit, EmbedHost, EmbedOptions, Position, QueuedCall, ReadyState, Theme, WidgetMounter,
    auto_init_plan, queued_calls,
};
pub use error::{OptionsError, StoreError, UnknownLanguage};
pub use language::Language;
pub use settings::{Direction, Flag, Settings, SettingsPatch};
pub use signal::{LANGUAGE_ATTRIBUTE, LanguageSignal, Subscription, resolve_language};
pub use storage::{KeyValueStore, LANGUAGE_KEY, MemoryStore, PreferenceStore, SETTINGS_KEY};
