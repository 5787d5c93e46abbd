//! The settings record and the partial updates merged onto it.
//!
//! `Settings` is always complete. Every change arrives as a [`SettingsPatch`],
//! including the JSON read back from storage, so records written by older
//! versions of the widget (missing fields, the boolean `highContrast` flag)
//! overlay cleanly onto the defaults.

use serde::{Deserialize, Serialize};

pub const FONT_SIZE_MIN: u16 = 80;
pub const FONT_SIZE_MAX: u16 = 150;
pub const FONT_SIZE_DEFAULT: u16 = 100;

pub const CONTRAST_MIN: u16 = 50;
pub const CONTRAST_MAX: u16 = 200;
pub const CONTRAST_DEFAULT: u16 = 100;

/// Increment applied by a single +/- press on either percentage control.
pub const STEP: u16 = 10;

/// Contrast a legacy `highContrast: true` record migrates to.
pub const LEGACY_HIGH_CONTRAST: u16 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    const fn delta(self) -> i64 {
        match self {
            Self::Increase => STEP as i64,
            Self::Decrease => -(STEP as i64),
        }
    }
}

/// Boolean preferences addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    DyslexicFont,
    HighlightLinks,
    TextSpacing,
    PauseAnimations,
    HideImages,
    LargeCursor,
    PageStructure,
    DarkMode,
}

impl Flag {
    pub const ALL: [Self; 8] = [
        Self::DyslexicFont,
        Self::HighlightLinks,
        Self::TextSpacing,
        Self::PauseAnimations,
        Self::HideImages,
        Self::LargeCursor,
        Self::PageStructure,
        Self::DarkMode,
    ];

    /// Field name used in the persisted JSON record.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DyslexicFont => "dyslexicFont",
            Self::HighlightLinks => "highlightLinks",
            Self::TextSpacing => "textSpacing",
            Self::PauseAnimations => "pauseAnimations",
            Self::HideImages => "hideImages",
            Self::LargeCursor => "largeCursor",
            Self::PageStructure => "pageStructure",
            Self::DarkMode => "darkMode",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub is_open: bool,
    pub font_size: u16,
    pub contrast: u16,
    pub dyslexic_font: bool,
    pub highlight_links: bool,
    pub text_spacing: bool,
    pub pause_animations: bool,
    pub hide_images: bool,
    pub large_cursor: bool,
    pub page_structure: bool,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_open: false,
            font_size: FONT_SIZE_DEFAULT,
            contrast: CONTRAST_DEFAULT,
            dyslexic_font: false,
            highlight_links: false,
            text_spacing: false,
            pause_animations: false,
            hide_images: false,
            large_cursor: false,
            page_structure: false,
            dark_mode: false,
        }
    }
}

fn clamp_percent(value: i64, min: u16, max: u16) -> u16 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    u16::try_from(clamped).unwrap_or(min)
}

/// Clamp an arbitrary font-size percentage into `[80, 150]`.
#[must_use]
pub fn clamp_font_size(value: i64) -> u16 {
    clamp_percent(value, FONT_SIZE_MIN, FONT_SIZE_MAX)
}

/// Clamp an arbitrary contrast percentage into `[50, 200]`.
#[must_use]
pub fn clamp_contrast(value: i64) -> u16 {
    clamp_percent(value, CONTRAST_MIN, CONTRAST_MAX)
}

impl Settings {
    #[must_use]
    pub const fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::DyslexicFont => self.dyslexic_font,
            Flag::HighlightLinks => self.highlight_links,
            Flag::TextSpacing => self.text_spacing,
            Flag::PauseAnimations => self.pause_animations,
            Flag::HideImages => self.hide_images,
            Flag::LargeCursor => self.large_cursor,
            Flag::PageStructure => self.page_structure,
            Flag::DarkMode => self.dark_mode,
        }
    }

    const fn flag_mut(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::DyslexicFont => &mut self.dyslexic_font,
            Flag::HighlightLinks => &mut self.highlight_links,
            Flag::TextSpacing => &mut self.text_spacing,
            Flag::PauseAnimations => &mut self.pause_animations,
            Flag::HideImages => &mut self.hide_images,
            Flag::LargeCursor => &mut self.large_cursor,
            Flag::PageStructure => &mut self.page_structure,
            Flag::DarkMode => &mut self.dark_mode,
        }
    }

    /// Font size after one step in `direction`, clamped to range.
    #[must_use]
    pub fn stepped_font_size(&self, direction: Direction) -> u16 {
        clamp_font_size(i64::from(self.font_size) + direction.delta())
    }

    /// Contrast after one step in `direction`, clamped to range.
    #[must_use]
    pub fn stepped_contrast(&self, direction: Direction) -> u16 {
        clamp_contrast(i64::from(self.contrast) + direction.delta())
    }

    /// Whether a font-size step would change anything; the panel disables the
    /// matching button when it would not.
    #[must_use]
    pub fn can_step_font_size(&self, direction: Direction) -> bool {
        self.stepped_font_size(direction) != self.font_size
    }

    #[must_use]
    pub fn can_step_contrast(&self, direction: Direction) -> bool {
        self.stepped_contrast(direction) != self.contrast
    }

    /// Merge `patch` onto this record. Numeric fields are clamped on the way in.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        if let Some(open) = patch.is_open {
            self.is_open = open;
        }
        if let Some(size) = patch.font_size {
            self.font_size = clamp_font_size(size);
        }
        match (patch.contrast, patch.high_contrast) {
            (Some(contrast), _) => self.contrast = clamp_contrast(contrast),
            (None, Some(true)) => self.contrast = LEGACY_HIGH_CONTRAST,
            (None, Some(false)) => self.contrast = CONTRAST_DEFAULT,
            (None, None) => {}
        }
        for flag in Flag::ALL {
            if let Some(value) = patch.flag(flag) {
                *self.flag_mut(flag) = value;
            }
        }
    }

    #[must_use]
    pub fn merged(mut self, patch: &SettingsPatch) -> Self {
        self.apply_patch(patch);
        self
    }

    /// Defaults for every preference, keeping the current panel visibility.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            is_open: self.is_open,
            ..Self::default()
        }
    }
}

/// A partial settings record. Absent fields leave the target untouched.
///
/// Also the shape persisted JSON is decoded into, so unknown keys are ignored
/// and missing keys fall back to whatever the record already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<i64>,
    /// Boolean contrast flag written by the first widget release.
    #[serde(skip_serializing)]
    pub high_contrast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dyslexic_font: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_spacing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_animations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_cursor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_structure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl SettingsPatch {
    #[must_use]
    pub fn open(is_open: bool) -> Self {
        Self {
            is_open: Some(is_open),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn font_size(value: u16) -> Self {
        Self {
            font_size: Some(i64::from(value)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn contrast(value: u16) -> Self {
        Self {
            contrast: Some(i64::from(value)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_flag(flag: Flag, value: bool) -> Self {
        let mut patch = Self::default();
        *patch.flag_slot(flag) = Some(value);
        patch
    }

    /// Every preference at its default; panel visibility is left alone.
    #[must_use]
    pub fn reset() -> Self {
        let defaults = Settings::default();
        let mut patch = Self::font_size(defaults.font_size);
        patch.contrast = Some(i64::from(defaults.contrast));
        for flag in Flag::ALL {
            *patch.flag_slot(flag) = Some(defaults.flag(flag));
        }
        patch
    }

    #[must_use]
    pub const fn flag(&self, flag: Flag) -> Option<bool> {
        match flag {
            Flag::DyslexicFont => self.dyslexic_font,
            Flag::HighlightLinks => self.highlight_links,
            Flag::TextSpacing => self.text_spacing,
            Flag::PauseAnimations => self.pause_animations,
            Flag::HideImages => self.hide_images,
            Flag::LargeCursor => self.large_cursor,
            Flag::PageStructure => self.page_structure,
            Flag::DarkMode => self.dark_mode,
        }
    }

    const fn flag_slot(&mut self, flag: Flag) -> &mut Option<bool> {
        match flag {
            Flag::DyslexicFont => &mut self.dyslexic_font,
            Flag::HighlightLinks => &mut self.highlight_links,
            Flag::TextSpacing => &mut self.text_spacing,
            Flag::PauseAnimations => &mut self.pause_animations,
            Flag::HideImages => &mut self.hide_images,
            Flag::LargeCursor => &mut self.large_cursor,
            Flag::PageStructure => &mut self.page_structure,
            Flag::DarkMode => &mut self.dark_mode,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
