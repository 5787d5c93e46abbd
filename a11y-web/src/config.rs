//! Compile-time configuration for the widget build.
//!
//! Values come from environment variables at build time so the same sources
//! produce the demo site, a staging script and the CDN artifact. Unset
//! variables fall back to the defaults below.

use a11y_core::effects::DEFAULT_FONT_CSS_URL;

pub const DEFAULT_CHAT_ENDPOINT: &str = "/api/ai-chat";
pub const DEFAULT_CDN_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/skillblend-a11y-widget@latest/dist/widget.js";

/// Endpoint the chat panel POSTs `{ "message": ... }` to.
#[must_use]
pub fn chat_endpoint() -> String {
    non_empty_or(option_env!("A11Y_CHAT_ENDPOINT"), DEFAULT_CHAT_ENDPOINT)
}

/// Stylesheet that provides the dyslexia-friendly typeface.
#[must_use]
pub fn font_css_url() -> String {
    non_empty_or(option_env!("A11Y_FONT_CSS_URL"), DEFAULT_FONT_CSS_URL)
}

/// Base path for the demo router (e.g., `/widget` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL of the built embed script, as shown in the integration snippets.
#[must_use]
pub fn script_url() -> String {
    asset_path_with_base("widget.js", option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Published copy of the embed script, offered as the CDN snippet.
#[must_use]
pub fn cdn_script_url() -> String {
    non_empty_or(option_env!("A11Y_CDN_SCRIPT_URL"), DEFAULT_CDN_SCRIPT_URL)
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(non_empty_or(None, "/api/ai-chat"), "/api/ai-chat");
        assert_eq!(non_empty_or(Some("  "), "/api/ai-chat"), "/api/ai-chat");
        assert_eq!(
            non_empty_or(Some("https://chat.example/v1"), "/api/ai-chat"),
            "https://chat.example/v1"
        );
    }

    #[test]
    fn script_url_respects_public_base() {
        assert_eq!(asset_path_with_base("widget.js", ""), "/widget.js");
        assert_eq!(
            asset_path_with_base("/widget.js", "/widget/"),
            "/widget/widget.js"
        );
    }

    #[test]
    fn router_base_returns_trimmed_value() {
        assert_eq!(router_base_with_base(""), None);
        assert_eq!(
            router_base_with_base("/widget/"),
            Some(String::from("/widget"))
        );
    }
}
