use a11y_core::{
    Flag, KeyValueStore, LANGUAGE_KEY, Language, MemoryStore, PreferenceStore, SETTINGS_KEY,
    Settings, SettingsPatch,
};

fn record_for(mask: u16, font_size: u16, contrast: u16) -> Settings {
    let mut settings = Settings {
        is_open: mask & 1 == 1,
        font_size,
        contrast,
        ..Settings::default()
    };
    for (bit, flag) in Flag::ALL.into_iter().enumerate() {
        let on = mask & (1 << (bit + 1)) != 0;
        settings.apply_patch(&SettingsPatch::with_flag(flag, on));
    }
    settings
}

#[test]
fn every_flag_combination_survives_storage() {
    let font_sizes = [80, 100, 150];
    let contrasts = [50, 100, 200];
    let store = PreferenceStore::new(MemoryStore::new());
    for mask in 0_u16..512 {
        let idx = usize::from(mask) % 3;
        let record = record_for(mask, font_sizes[idx], contrasts[(idx + 1) % 3]);
        store.save(&record).expect("save");
        assert_eq!(store.load(), Some(record), "mask {mask:#b}");
    }
}

#[test]
fn persisted_record_is_plain_camel_case_json() {
    let store = MemoryStore::new();
    PreferenceStore::new(store.clone())
        .save(&Settings {
            hide_images: true,
            ..Settings::default()
        })
        .expect("save");
    let raw = store.get_item(SETTINGS_KEY).expect("entry");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let object = value.as_object().expect("object");
    assert_eq!(object.len(), 11);
    assert_eq!(object["hideImages"], true);
    assert_eq!(object["isOpen"], false);
}

#[test]
fn first_release_record_loads() {
    let store = MemoryStore::with_entry(
        SETTINGS_KEY,
        r#"{"isOpen":true,"fontSize":130,"highContrast":true,"dyslexicFont":false}"#,
    );
    let loaded = PreferenceStore::new(store).load().expect("loads");
    assert!(loaded.is_open);
    assert_eq!(loaded.font_size, 130);
    assert_eq!(loaded.contrast, 150);
    assert!(!loaded.dark_mode);
}

#[test]
fn out_of_range_saved_values_are_clamped() {
    let store = MemoryStore::with_entry(SETTINGS_KEY, r#"{"fontSize":300,"contrast":10}"#);
    let loaded = PreferenceStore::new(store).load().expect("loads");
    assert_eq!(loaded.font_size, 150);
    assert_eq!(loaded.contrast, 50);
}

#[test]
fn unsupported_language_reads_as_default_without_error() {
    let store = PreferenceStore::new(MemoryStore::with_entry(LANGUAGE_KEY, "fr"));
    assert_eq!(store.load_language().unwrap_or_default(), Language::En);
}
