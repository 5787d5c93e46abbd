//! Style effector: makes a document match a settings record.
//!
//! Every call rewrites the full set of managed properties, classes and nodes,
//! so the outcome depends only on the record passed in and never on what a
//! previous call left behind.

mod memory;

pub use memory::{DocumentSnapshot, ManagedNode, MemoryDocument};

use crate::settings::{Flag, Settings};

/// Id of the injected web-font stylesheet link.
pub const FONT_LINK_ID: &str = "opendyslexic-font";
pub const DEFAULT_FONT_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/opendyslexic@latest/opendyslexic.css";
pub const DYSLEXIC_FONT_FAMILY: &str = "\"OpenDyslexic\", sans-serif";

/// Marker class for dark mode on the root element.
pub const DARK_CLASS: &str = "dark";

pub const LARGE_CURSOR: &str = "url(\"data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='48' height='48' viewBox='0 0 48 48'%3E%3Cpath d='M8 4 L8 40 L18 30 L25 44 L31 41 L24 27 L38 27 Z' fill='black' stroke='white' stroke-width='2'/%3E%3C/svg%3E\") 8 4, auto";

/// The root-element inline properties the effector owns.
pub const MANAGED_ROOT_PROPERTIES: [&str; 4] = ["font-size", "filter", "font-family", "cursor"];

/// An id-addressed `<style>` fragment bound to one boolean preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub id: &'static str,
    pub flag: Flag,
    pub css: &'static str,
}

pub const STYLE_RULES: [StyleRule; 5] = [
    StyleRule {
        id: "a11y-highlight-links",
        flag: Flag::HighlightLinks,
        css: "a, a * { text-decoration: underline !important; text-decoration-thickness: 2px !important; } a { outline: 2px solid #f5b400 !important; outline-offset: 2px !important; border-radius: 2px; }",
    },
    StyleRule {
        id: "a11y-text-spacing",
        flag: Flag::TextSpacing,
        css: "body, body * { letter-spacing: 0.12em !important; word-spacing: 0.16em !important; line-height: 1.5 !important; }",
    },
    StyleRule {
        id: "a11y-pause-animations",
        flag: Flag::PauseAnimations,
        css: "*, *::before, *::after { animation-duration: 0.001ms !important; animation-iteration-count: 1 !important; transition-duration: 0.001ms !important; scroll-behavior: auto !important; } html { scroll-behavior: auto !important; }",
    },
    StyleRule {
        id: "a11y-hide-images",
        flag: Flag::HideImages,
        css: "img, picture, [role='img'] { visibility: hidden !important; }",
    },
    StyleRule {
        id: "a11y-page-structure",
        flag: Flag::PageStructure,
        css: "h1, h2, h3, h4, h5, h6 { outline: 2px dashed #2563eb !important; outline-offset: 4px !important; }",
    },
];

/// The document operations the effector needs.
///
/// Methods take `&self`: DOM handles are shared and mutate in place.
pub trait StyleTarget {
    /// Set an inline style property on the root element; `None` clears it.
    fn set_root_style(&self, property: &str, value: Option<&str>);

    fn set_root_class(&self, class: &str, enabled: bool);

    fn set_root_attribute(&self, name: &str, value: &str);

    fn has_node(&self, id: &str) -> bool;

    /// Append a stylesheet `<link>` with the given id to the document head.
    fn insert_stylesheet_link(&self, id: &str, href: &str);

    /// Create the `<style>` element if missing, then replace its text.
    fn upsert_style(&self, id: &str, css: &str);

    /// Remove the node with this id. Absent nodes are ignored.
    fn remove_node(&self, id: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEffector {
    font_css_url: String,
}

impl Default for StyleEffector {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_CSS_URL)
    }
}

impl StyleEffector {
    pub fn new(font_css_url: impl Into<String>) -> Self {
        Self {
            font_css_url: font_css_url.into(),
        }
    }

    #[must_use]
    pub fn font_css_url(&self) -> &str {
        &self.font_css_url
    }

    /// Rewrite every managed effect so `target` reflects `settings`.
    pub fn apply<T: StyleTarget + ?Sized>(&self, target: &T, settings: &Settings) {
        let font_size = format!("{}%", settings.font_size);
        target.set_root_style("font-size", Some(&font_size));

        let filter = contrast_filter(settings.contrast);
        target.set_root_style("filter", Some(&filter));

        if settings.dyslexic_font {
            if !target.has_node(FONT_LINK_ID) {
                target.insert_stylesheet_link(FONT_LINK_ID, &self.font_css_url);
            }
            target.set_root_style("font-family", Some(DYSLEXIC_FONT_FAMILY));
        } else {
            target.set_root_style("font-family", None);
        }

        target.set_root_class(DARK_CLASS, settings.dark_mode);

        for rule in &STYLE_RULES {
            if settings.flag(rule.flag) {
                target.upsert_style(rule.id, rule.css);
            } else {
                target.remove_node(rule.id);
            }
        }

        let cursor = settings.large_cursor.then_some(LARGE_CURSOR);
        target.set_root_style("cursor", cursor);
    }
}

#[must_use]
pub fn contrast_filter(contrast: u16) -> String {
    format!("contrast({contrast}%)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_on() -> Settings {
        let mut settings = Settings {
            font_size: 130,
            contrast: 170,
            ..Settings::default()
        };
        for flag in Flag::ALL {
            settings = settings.merged(&crate::settings::SettingsPatch::with_flag(flag, true));
        }
        settings
    }

    #[test]
    fn applies_scale_and_contrast_to_root() {
        let doc = MemoryDocument::new();
        StyleEffector::default().apply(&doc, &Settings::default());
        assert_eq!(doc.root_style("font-size").as_deref(), Some("100%"));
        assert_eq!(doc.root_style("filter").as_deref(), Some("contrast(100%)"));
        assert_eq!(doc.root_style("font-family"), None);
        assert_eq!(doc.root_style("cursor"), None);
        assert!(!doc.has_class(DARK_CLASS));
    }

    #[test]
    fn enabling_everything_creates_all_managed_nodes() {
        let doc = MemoryDocument::new();
        StyleEffector::default().apply(&doc, &all_on());
        for rule in &STYLE_RULES {
            assert_eq!(doc.style_text(rule.id).as_deref(), Some(rule.css));
        }
        assert!(doc.has_node(FONT_LINK_ID));
        assert!(doc.has_class(DARK_CLASS));
        assert_eq!(doc.root_style("cursor").as_deref(), Some(LARGE_CURSOR));
        assert_eq!(
            doc.root_style("font-family").as_deref(),
            Some(DYSLEXIC_FONT_FAMILY)
        );
    }

    #[test]
    fn toggling_off_removes_style_nodes() {
        let doc = MemoryDocument::new();
        let effector = StyleEffector::default();
        effector.apply(&doc, &all_on());
        effector.apply(&doc, &Settings::default());
        for rule in &STYLE_RULES {
            assert!(!doc.has_node(rule.id), "{} should be removed", rule.id);
        }
        assert!(!doc.has_class(DARK_CLASS));
        assert_eq!(doc.root_style("cursor"), None);
        assert_eq!(doc.root_style("font-family"), None);
    }

    #[test]
    fn font_link_is_injected_once() {
        let doc = MemoryDocument::new();
        let effector = StyleEffector::new("https://fonts.example/dyslexic.css");
        let on = Settings {
            dyslexic_font: true,
            ..Settings::default()
        };
        effector.apply(&doc, &on);
        effector.apply(&doc, &Settings::default());
        effector.apply(&doc, &on);
        assert_eq!(doc.link_insertions(), 1);
        assert_eq!(
            doc.snapshot().nodes.get(FONT_LINK_ID),
            Some(&ManagedNode::StylesheetLink {
                href: "https://fonts.example/dyslexic.css".to_string()
            })
        );
    }

    #[test]
    fn reapplying_same_record_is_idempotent() {
        let effector = StyleEffector::default();
        let settings = all_on();
        let once = MemoryDocument::new();
        effector.apply(&once, &settings);
        let twice = MemoryDocument::new();
        effector.apply(&twice, &settings);
        effector.apply(&twice, &settings);
        assert_eq!(once.snapshot(), twice.snapshot());
    }
}
