//! Property checks run against the core crate with the in-memory document
//! and store. Each check draws its inputs from the seeded generator it is
//! handed, so a failing seed replays exactly.

use a11y_core::effects::{
    DARK_CLASS, DYSLEXIC_FONT_FAMILY, FONT_LINK_ID, LARGE_CURSOR, contrast_filter,
};
use a11y_core::settings::{
    CONTRAST_MAX, CONTRAST_MIN, FONT_SIZE_MAX, FONT_SIZE_MIN, LEGACY_HIGH_CONTRAST, STEP,
};
use a11y_core::{
    APOLOGY, ChatError, ChatResponse, ChatState, Direction, EmbedHost, EmbedOptions, Flag,
    LANGUAGE_ATTRIBUTE, LANGUAGE_KEY, Language, LanguageSignal, MemoryDocument, MemoryStore,
    PanelState, Position, PreferenceStore, SETTINGS_KEY, STYLE_RULES, Settings, StyleEffector,
    StyleTarget, WidgetController, WidgetMounter, resolve_language,
};
use anyhow::{Result, ensure};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

pub type Harness = WidgetController<MemoryStore, MemoryDocument>;

/// Mount a controller over `store` with a fresh document.
pub fn mount_harness(store: MemoryStore) -> Harness {
    WidgetController::mount(
        PreferenceStore::new(store),
        MemoryDocument::new(),
        StyleEffector::default(),
        LanguageSignal::default(),
    )
}

/// One user interaction with the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStep {
    TogglePanel,
    FontSize(Direction),
    Contrast(Direction),
    Flag(Flag),
    Reset,
    Language(Language),
}

impl WidgetStep {
    pub fn random(rng: &mut ChaCha20Rng) -> Self {
        let direction = if rng.gen_bool(0.5) {
            Direction::Increase
        } else {
            Direction::Decrease
        };
        match rng.gen_range(0..20) {
            0..=1 => Self::TogglePanel,
            2..=5 => Self::FontSize(direction),
            6..=9 => Self::Contrast(direction),
            10..=16 => Self::Flag(*Flag::ALL.choose(rng).unwrap_or(&Flag::DarkMode)),
            17 => Self::Reset,
            _ => Self::Language(*Language::ALL.choose(rng).unwrap_or(&Language::En)),
        }
    }

    pub fn apply(self, harness: &mut Harness) {
        match self {
            Self::TogglePanel => {
                harness.toggle_open();
            }
            Self::FontSize(direction) => {
                harness.adjust_font_size(direction);
            }
            Self::Contrast(direction) => {
                harness.adjust_contrast(direction);
            }
            Self::Flag(flag) => {
                harness.toggle_flag(flag);
            }
            Self::Reset => {
                harness.reset();
            }
            Self::Language(language) => harness.set_language(language),
        }
    }
}

fn random_walk(rng: &mut ChaCha20Rng, harness: &mut Harness, steps: usize) -> Result<()> {
    for index in 0..steps {
        let step = WidgetStep::random(rng);
        step.apply(harness);
        verify_consistency(harness)
            .map_err(|err| err.context(format!("after step {} ({step:?})", index + 1)))?;
    }
    Ok(())
}

fn random_settings(rng: &mut ChaCha20Rng) -> Settings {
    let font_steps = (FONT_SIZE_MAX - FONT_SIZE_MIN) / STEP;
    let contrast_steps = (CONTRAST_MAX - CONTRAST_MIN) / STEP;
    Settings {
        is_open: rng.gen_bool(0.5),
        font_size: FONT_SIZE_MIN + STEP * rng.gen_range(0..=font_steps),
        contrast: CONTRAST_MIN + STEP * rng.gen_range(0..=contrast_steps),
        dyslexic_font: rng.gen_bool(0.5),
        highlight_links: rng.gen_bool(0.5),
        text_spacing: rng.gen_bool(0.5),
        pause_animations: rng.gen_bool(0.5),
        hide_images: rng.gen_bool(0.5),
        large_cursor: rng.gen_bool(0.5),
        page_structure: rng.gen_bool(0.5),
        dark_mode: rng.gen_bool(0.5),
    }
}

fn verify_ranges(settings: &Settings) -> Result<()> {
    ensure!(
        (FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&settings.font_size),
        "font size {} left [{FONT_SIZE_MIN}, {FONT_SIZE_MAX}]",
        settings.font_size
    );
    ensure!(
        (CONTRAST_MIN..=CONTRAST_MAX).contains(&settings.contrast),
        "contrast {} left [{CONTRAST_MIN}, {CONTRAST_MAX}]",
        settings.contrast
    );
    Ok(())
}

/// The document shows exactly what `settings` asks for.
pub fn verify_document(doc: &MemoryDocument, settings: &Settings) -> Result<()> {
    let font_size = format!("{}%", settings.font_size);
    ensure!(
        doc.root_style("font-size").as_deref() == Some(font_size.as_str()),
        "root font-size is {:?}, expected {font_size}",
        doc.root_style("font-size")
    );
    let filter = contrast_filter(settings.contrast);
    ensure!(
        doc.root_style("filter").as_deref() == Some(filter.as_str()),
        "root filter is {:?}, expected {filter}",
        doc.root_style("filter")
    );
    ensure!(
        doc.has_class(DARK_CLASS) == settings.dark_mode,
        "dark class present: {}, dark mode: {}",
        doc.has_class(DARK_CLASS),
        settings.dark_mode
    );
    let expected_family = settings.dyslexic_font.then_some(DYSLEXIC_FONT_FAMILY);
    ensure!(
        doc.root_style("font-family").as_deref() == expected_family,
        "font-family is {:?} with dyslexic font {}",
        doc.root_style("font-family"),
        settings.dyslexic_font
    );
    let expected_cursor = settings.large_cursor.then_some(LARGE_CURSOR);
    ensure!(
        doc.root_style("cursor").as_deref() == expected_cursor,
        "cursor style out of sync with large cursor {}",
        settings.large_cursor
    );
    for rule in &STYLE_RULES {
        ensure!(
            doc.has_node(rule.id) == settings.flag(rule.flag),
            "style node {} present: {}, flag {}: {}",
            rule.id,
            doc.has_node(rule.id),
            rule.flag.key(),
            settings.flag(rule.flag)
        );
    }
    ensure!(
        doc.link_insertions() <= 1,
        "font stylesheet inserted {} times",
        doc.link_insertions()
    );
    if settings.dyslexic_font {
        ensure!(doc.has_node(FONT_LINK_ID), "font stylesheet link missing");
    }
    Ok(())
}

/// Settings, storage, document and language all agree.
pub fn verify_consistency(harness: &Harness) -> Result<()> {
    let settings = harness.settings();
    verify_ranges(settings)?;
    ensure!(
        settings.font_size % STEP == 0 && settings.contrast % STEP == 0,
        "values drifted off the {STEP}-point grid: {settings:?}"
    );

    match harness.store().load() {
        Some(saved) => {
            ensure!(
                saved == *settings,
                "saved record {saved:?} differs from live {settings:?}"
            );
            verify_document(harness.target(), settings)?;
        }
        None => {
            ensure!(
                *settings == Settings::default(),
                "settings changed without being saved: {settings:?}"
            );
            ensure!(
                harness.target().root_style("font-size").is_none(),
                "document styled before any change"
            );
        }
    }

    let language = harness.language();
    ensure!(
        harness.signal().get() == language,
        "signal carries {:?}, controller {language:?}",
        harness.signal().get()
    );
    ensure!(
        harness.target().root_attribute(LANGUAGE_ATTRIBUTE).as_deref() == Some(language.code()),
        "root {LANGUAGE_ATTRIBUTE} out of sync with {language:?}"
    );
    Ok(())
}

/// First visit, open and close, reload.
pub fn smoke(_rng: &mut ChaCha20Rng) -> Result<()> {
    let store = MemoryStore::new();
    let mut harness = mount_harness(store.clone());
    ensure!(
        *harness.settings() == Settings::default(),
        "first visit should start from defaults"
    );
    ensure!(harness.panel() == PanelState::Closed, "panel should start closed");
    verify_consistency(&harness)?;

    harness.toggle_open();
    ensure!(harness.panel() == PanelState::Open, "toggle should open the panel");
    verify_consistency(&harness)?;

    let reloaded = mount_harness(store);
    ensure!(
        reloaded.settings() == harness.settings(),
        "reload lost the saved record"
    );
    Ok(())
}

/// A long run of random interactions, checking every state along the way,
/// then a reload from the same storage.
pub fn random_interactions(rng: &mut ChaCha20Rng) -> Result<()> {
    let store = MemoryStore::new();
    let mut harness = mount_harness(store.clone());
    let steps = rng.gen_range(40..160);
    random_walk(rng, &mut harness, steps)?;

    let reloaded = mount_harness(store);
    verify_consistency(&reloaded)?;
    ensure!(
        reloaded.settings() == harness.settings(),
        "reload restored {:?}, expected {:?}",
        reloaded.settings(),
        harness.settings()
    );
    ensure!(
        reloaded.language() == harness.language(),
        "reload restored language {:?}",
        reloaded.language()
    );
    Ok(())
}

/// Applying the same record twice leaves the document as the first pass did.
pub fn idempotent_effects(rng: &mut ChaCha20Rng) -> Result<()> {
    let effector = StyleEffector::default();
    let doc = MemoryDocument::new();
    let settings = random_settings(rng);

    effector.apply(&doc, &settings);
    let first = doc.snapshot();
    effector.apply(&doc, &settings);
    ensure!(doc.snapshot() == first, "second apply changed the document");
    verify_document(&doc, &settings)?;

    let next = random_settings(rng);
    effector.apply(&doc, &next);
    verify_document(&doc, &next)?;

    effector.apply(&doc, &Settings::default());
    for rule in &STYLE_RULES {
        ensure!(!doc.has_node(rule.id), "{} survived a return to defaults", rule.id);
    }
    Ok(())
}

/// Reset after a random walk restores defaults but keeps the panel state.
pub fn reset_restores_defaults(rng: &mut ChaCha20Rng) -> Result<()> {
    let mut harness = mount_harness(MemoryStore::new());
    let steps = rng.gen_range(5..40);
    random_walk(rng, &mut harness, steps)?;

    let was_open = harness.settings().is_open;
    harness.reset();
    ensure!(
        *harness.settings()
            == Settings {
                is_open: was_open,
                ..Settings::default()
            },
        "reset left {:?}",
        harness.settings()
    );
    verify_consistency(&harness)?;
    Ok(())
}

/// Saved records load back, including the legacy boolean-contrast shape,
/// out-of-range numbers and unreadable entries.
pub fn persistence(rng: &mut ChaCha20Rng) -> Result<()> {
    let settings = random_settings(rng);
    let store = MemoryStore::new();
    PreferenceStore::new(store.clone()).save(&settings)?;
    let harness = mount_harness(store);
    ensure!(
        *harness.settings() == settings,
        "saved {settings:?}, mounted {:?}",
        harness.settings()
    );
    verify_document(harness.target(), &settings)?;

    let high_contrast = rng.gen_bool(0.5);
    let legacy = json!({
        "isOpen": false,
        "fontSize": settings.font_size,
        "highContrast": high_contrast,
        "dyslexicFont": settings.dyslexic_font,
    });
    let harness = mount_harness(MemoryStore::with_entry(SETTINGS_KEY, &legacy.to_string()));
    let expected_contrast = if high_contrast {
        LEGACY_HIGH_CONTRAST
    } else {
        Settings::default().contrast
    };
    ensure!(
        harness.settings().contrast == expected_contrast,
        "legacy highContrast {high_contrast} loaded as contrast {}",
        harness.settings().contrast
    );
    ensure!(
        harness.settings().font_size == settings.font_size,
        "legacy font size lost"
    );

    let wild = rng.gen_range(-500..1000);
    let out_of_range = json!({ "fontSize": wild, "contrast": wild });
    let harness = mount_harness(MemoryStore::with_entry(
        SETTINGS_KEY,
        &out_of_range.to_string(),
    ));
    verify_ranges(harness.settings())?;

    let garbage = [
        "{",
        "null",
        "[1,2,3]",
        "[true,130]",
        "\"fontSize\"",
        "{\"fontSize\":\"big\"}",
    ];
    let raw = garbage.choose(rng).copied().unwrap_or("{");
    let harness = mount_harness(MemoryStore::with_entry(SETTINGS_KEY, raw));
    ensure!(
        *harness.settings() == Settings::default(),
        "unreadable record {raw:?} produced {:?}",
        harness.settings()
    );
    verify_consistency(&harness)?;
    Ok(())
}

/// Language choices persist, broadcast and resolve in the documented order.
pub fn language_sync(rng: &mut ChaCha20Rng) -> Result<()> {
    let store = MemoryStore::new();
    let mut harness = mount_harness(store.clone());
    let heard = Rc::new(Cell::new(0_usize));
    let _subscription = {
        let heard = Rc::clone(&heard);
        harness.signal().subscribe(move |_| heard.set(heard.get() + 1))
    };

    let mut last = harness.language();
    let mut changes = 0;
    for _ in 0..rng.gen_range(1..10) {
        let next = *Language::ALL.choose(rng).unwrap_or(&Language::En);
        if next != last {
            changes += 1;
        }
        last = next;
        harness.set_language(next);
        verify_consistency(&harness)?;
    }
    ensure!(
        heard.get() == changes,
        "subscriber heard {} of {changes} changes",
        heard.get()
    );

    let reloaded = mount_harness(store.clone());
    ensure!(reloaded.language() == last, "reload restored {:?}", reloaded.language());

    let codes = ["en", "es", "fr", "", "EN"];
    let attribute = codes.choose(rng).copied();
    let persisted = codes.choose(rng).copied();
    let resolved = resolve_language(attribute, persisted);
    let expected = attribute
        .and_then(Language::from_code)
        .or_else(|| persisted.and_then(Language::from_code))
        .unwrap_or(Language::En);
    ensure!(
        resolved == expected,
        "resolve({attribute:?}, {persisted:?}) gave {resolved:?}"
    );

    let bad = mount_harness(MemoryStore::with_entry(LANGUAGE_KEY, "xx"));
    ensure!(bad.language() == Language::En, "unknown saved language not ignored");
    Ok(())
}

/// Counts live widgets so double mounts show up.
#[derive(Debug, Default)]
pub struct CountingMounter {
    pub live: usize,
    pub mounts: usize,
}

impl WidgetMounter for CountingMounter {
    type Mounted = ();
    type Error = String;

    fn mount(&mut self, _options: &EmbedOptions) -> Result<(), String> {
        self.live += 1;
        self.mounts += 1;
        Ok(())
    }

    fn unmount(&mut self, (): ()) {
        self.live = self.live.saturating_sub(1);
    }
}

/// Raw `init` options and the position they should resolve to.
fn random_options(rng: &mut ChaCha20Rng) -> (serde_json::Value, Position) {
    match rng.gen_range(0..4) {
        0 => (serde_json::Value::Null, Position::default()),
        1 => (json!({ "position": "middle" }), Position::default()),
        2 => (json!({ "colour": "teal" }), Position::default()),
        _ => {
            let position = *Position::ALL.choose(rng).unwrap_or(&Position::BottomRight);
            (json!({ "position": position.as_str() }), position)
        }
    }
}

/// Random init/destroy calls never leave more than one widget mounted.
pub fn embed_lifecycle(rng: &mut ChaCha20Rng) -> Result<()> {
    let mut host = EmbedHost::new(CountingMounter::default());
    let mut expected_options: Option<EmbedOptions> = None;

    for _ in 0..rng.gen_range(5..40) {
        if rng.gen_bool(0.6) {
            let (raw, position) = random_options(rng);
            let (options, _problems) = EmbedOptions::from_value(&raw);
            ensure!(
                options.position == position,
                "options {raw} parsed to {:?}",
                options.position
            );
            let mounted = host
                .init(options)
                .map_err(|err| anyhow::anyhow!("mount failed: {err}"))?;
            ensure!(
                mounted == expected_options.is_none(),
                "init reported {mounted} with a widget already mounted: {}",
                expected_options.is_some()
            );
            if mounted {
                expected_options = Some(options);
            }
        } else {
            let removed = host.destroy();
            ensure!(
                removed == expected_options.is_some(),
                "destroy reported {removed}"
            );
            expected_options = None;
        }

        ensure!(host.mounter().live <= 1, "{} widgets mounted", host.mounter().live);
        ensure!(
            host.is_mounted() == (host.mounter().live == 1),
            "host state disagrees with mounter"
        );
        ensure!(host.options() == expected_options, "host kept the wrong options");
    }
    Ok(())
}

/// Send gating, loading state and the fixed apology.
pub fn chat_lifecycle(rng: &mut ChaCha20Rng) -> Result<()> {
    let questions = ["", "   ", "\t", "What is WCAG?", "  Is 4.5:1 enough?  "];
    let mut chat = ChatState::default();
    chat.toggle();
    ensure!(chat.open, "toggle should open the chat");

    for _ in 0..rng.gen_range(3..12) {
        let question = questions.choose(rng).copied().unwrap_or("");
        chat.set_question(question);
        let blank = question.trim().is_empty();
        ensure!(chat.can_send() != blank, "send enabled for {question:?}: {}", chat.can_send());

        let Some(request) = chat.begin() else {
            ensure!(blank, "non-blank question {question:?} was not sent");
            continue;
        };
        ensure!(request.message == question, "request carried {:?}", request.message);
        ensure!(chat.loading && !chat.can_send(), "in-flight chat accepts another send");
        ensure!(chat.begin().is_none(), "second send while loading");

        let outcome = match rng.gen_range(0..4) {
            0 => Err(ChatError::Status(500)),
            1 => Err(ChatError::Transport("offline".into())),
            2 => Err(ChatError::Decode("missing field `response`".into())),
            _ => Ok(ChatResponse {
                response: format!("Answer to {}", question.trim()),
            }),
        };
        let expected = outcome
            .as_ref()
            .map_or_else(|_| APOLOGY.to_string(), |reply| reply.response.clone());
        chat.finish(outcome);
        ensure!(!chat.loading, "loading stuck after finish");
        ensure!(chat.question.is_empty(), "question kept after finish");
        ensure!(
            chat.response.as_deref() == Some(expected.as_str()),
            "response {:?}, expected {expected:?}",
            chat.response
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn every_check_passes_for_a_spread_of_seeds() {
        let checks: [fn(&mut ChaCha20Rng) -> Result<()>; 8] = [
            smoke,
            random_interactions,
            idempotent_effects,
            reset_restores_defaults,
            persistence,
            language_sync,
            embed_lifecycle,
            chat_lifecycle,
        ];
        for seed in [1, 7, 42, 1337, 9001] {
            for check in checks {
                check(&mut rng(seed)).unwrap_or_else(|err| panic!("seed {seed}: {err:#}"));
            }
        }
    }

    #[test]
    fn random_steps_replay_for_the_same_seed() {
        let first: Vec<WidgetStep> = {
            let mut r = rng(99);
            (0..32).map(|_| WidgetStep::random(&mut r)).collect()
        };
        let second: Vec<WidgetStep> = {
            let mut r = rng(99);
            (0..32).map(|_| WidgetStep::random(&mut r)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn verify_document_flags_a_missing_style_node() {
        let doc = MemoryDocument::new();
        let settings = Settings {
            hide_images: true,
            ..Settings::default()
        };
        StyleEffector::default().apply(&doc, &settings);
        doc.remove_node("a11y-hide-images");
        let err = verify_document(&doc, &settings).unwrap_err();
        assert!(err.to_string().contains("a11y-hide-images"));
    }
}
