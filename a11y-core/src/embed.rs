//! Embedding lifecycle: typed `init` options, container placement, the
//! mount/unmount guard and the script-tag auto-init policy.

use crate::error::OptionsError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Id of the container synthesized by `init`.
pub const CONTAINER_ID: &str = "skillblend-a11y-widget";
pub const CONTAINER_Z_INDEX: &str = "999999";
pub const CONTAINER_OFFSET: &str = "24px";

/// Script-tag attribute controlling auto-init.
pub const AUTO_INIT_ATTRIBUTE: &str = "data-auto-init";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    pub const ALL: [Self; 4] = [
        Self::BottomRight,
        Self::BottomLeft,
        Self::TopRight,
        Self::TopLeft,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pos| pos.as_str() == raw)
    }

    /// The two edges the container is pinned to.
    #[must_use]
    pub const fn anchors(self) -> [&'static str; 2] {
        match self {
            Self::BottomRight => ["bottom", "right"],
            Self::BottomLeft => ["bottom", "left"],
            Self::TopRight => ["top", "right"],
            Self::TopLeft => ["top", "left"],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted for forward compatibility; has no effect on rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbedOptions {
    pub position: Position,
    pub theme: Theme,
}

impl EmbedOptions {
    /// Read options from an untyped JSON value.
    ///
    /// `null` means "all defaults". Unknown keys and bad values are skipped
    /// and reported so the caller can log them; they never fail the call.
    #[must_use]
    pub fn from_value(value: &Value) -> (Self, Vec<OptionsError>) {
        let mut options = Self::default();
        let mut problems = Vec::new();
        let map = match value {
            Value::Null => return (options, problems),
            Value::Object(map) => map,
            _ => {
                problems.push(OptionsError::NotAnObject);
                return (options, problems);
            }
        };

        for (key, entry) in map {
            match key.as_str() {
                "position" => match entry.as_str().and_then(Position::parse) {
                    Some(position) => options.position = position,
                    None if entry.is_null() => {}
                    None => problems.push(OptionsError::InvalidPosition(value_label(entry))),
                },
                "theme" => match entry.as_str().and_then(Theme::parse) {
                    Some(theme) => options.theme = theme,
                    None if entry.is_null() => {}
                    None => problems.push(OptionsError::InvalidTheme(value_label(entry))),
                },
                other => problems.push(OptionsError::UnknownKey(other.to_string())),
            }
        }
        (options, problems)
    }

    /// Inline style declarations for the synthesized container.
    #[must_use]
    pub fn container_styles(&self) -> Vec<(&'static str, &'static str)> {
        let [vertical, horizontal] = self.position.anchors();
        vec![
            ("position", "fixed"),
            ("z-index", CONTAINER_Z_INDEX),
            (vertical, CONTAINER_OFFSET),
            (horizontal, CONTAINER_OFFSET),
        ]
    }
}

fn value_label(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

/// Platform half of the host: creates and tears down a rendered widget.
pub trait WidgetMounter {
    type Mounted;
    type Error: fmt::Display;

    /// Create the container and render the widget into it.
    ///
    /// # Errors
    ///
    /// Returns an error when the page offers nowhere to mount.
    fn mount(&mut self, options: &EmbedOptions) -> Result<Self::Mounted, Self::Error>;

    fn unmount(&mut self, mounted: Self::Mounted);
}

/// Explicitly owned widget instance handle; at most one widget is mounted.
pub struct EmbedHost<M: WidgetMounter> {
    mounter: M,
    mounted: Option<(M::Mounted, EmbedOptions)>,
}

impl<M: WidgetMounter> fmt::Debug for EmbedHost<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedHost")
            .field("mounted", &self.is_mounted())
            .field("options", &self.options())
            .finish_non_exhaustive()
    }
}

impl<M: WidgetMounter> EmbedHost<M> {
    pub const fn new(mounter: M) -> Self {
        Self {
            mounter,
            mounted: None,
        }
    }

    /// Mount the widget. Returns `Ok(false)` when one is already mounted.
    ///
    /// # Errors
    ///
    /// Propagates the mounter's error; the host stays unmounted.
    pub fn init(&mut self, options: EmbedOptions) -> Result<bool, M::Error> {
        if self.mounted.is_some() {
            log::debug!("accessibility widget already mounted; init ignored");
            return Ok(false);
        }
        let mounted = self.mounter.mount(&options)?;
        self.mounted = Some((mounted, options));
        Ok(true)
    }

    /// Unmount the widget. Returns `false` when nothing was mounted.
    pub fn destroy(&mut self) -> bool {
        match self.mounted.take() {
            Some((mounted, _)) => {
                self.mounter.unmount(mounted);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Options the current widget was mounted with.
    #[must_use]
    pub fn options(&self) -> Option<EmbedOptions> {
        self.mounted.as_ref().map(|(_, options)| *options)
    }

    pub const fn mounter(&self) -> &M {
        &self.mounter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoInit {
    Skip,
    Now,
    OnDomReady,
}

/// Decide what the script should do on load. Only the literal `"false"`
/// disables auto-init; a missing attribute enables it.
#[must_use]
pub fn auto_init_plan(attribute: Option<&str>, ready: ReadyState) -> AutoInit {
    if attribute == Some("false") {
        return AutoInit::Skip;
    }
    match ready {
        ReadyState::Loading => AutoInit::OnDomReady,
        ReadyState::Interactive | ReadyState::Complete => AutoInit::Now,
    }
}

/// A call recorded by the placeholder API before the script finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueuedCall {
    Init(Value),
    Destroy,
}

/// Read the placeholder's `q` array, oldest call first.
///
/// Each entry is `[name]` or `[name, options]`. Entries that are not arrays or
/// name an unknown method are dropped.
#[must_use]
pub fn queued_calls(queue: &Value) -> Vec<QueuedCall> {
    let Some(entries) = queue.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let args = entry.as_array()?;
            match args.first()?.as_str()? {
                "init" => Some(QueuedCall::Init(args.get(1).cloned().unwrap_or(Value::Null))),
                "destroy" => Some(QueuedCall::Destroy),
                other => {
                    log::warn!("dropping queued call to unknown method `{other}`");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct CountingMounter {
        live: usize,
        mounts: usize,
    }

    impl WidgetMounter for CountingMounter {
        type Mounted = usize;
        type Error = String;

        fn mount(&mut self, _options: &EmbedOptions) -> Result<usize, String> {
            self.live += 1;
            self.mounts += 1;
            Ok(self.mounts)
        }

        fn unmount(&mut self, _mounted: usize) {
            self.live -= 1;
        }
    }

    struct FailingMounter;

    impl WidgetMounter for FailingMounter {
        type Mounted = ();
        type Error = String;

        fn mount(&mut self, _options: &EmbedOptions) -> Result<(), String> {
            Err("document has no body".to_string())
        }

        fn unmount(&mut self, (): ()) {}
    }

    #[test]
    fn parses_recognized_options() {
        let (options, problems) =
            EmbedOptions::from_value(&json!({ "position": "top-left", "theme": "dark" }));
        assert_eq!(options.position, Position::TopLeft);
        assert_eq!(options.theme, Theme::Dark);
        assert!(problems.is_empty());
    }

    #[test]
    fn reports_unknown_keys_and_values() {
        let (options, problems) = EmbedOptions::from_value(
            &json!({ "position": "middle", "theme": 3, "colour": "red" }),
        );
        assert_eq!(options, EmbedOptions::default());
        assert!(problems.contains(&OptionsError::InvalidPosition("middle".into())));
        assert!(problems.contains(&OptionsError::InvalidTheme("3".into())));
        assert!(problems.contains(&OptionsError::UnknownKey("colour".into())));
    }

    #[test]
    fn null_and_non_objects_fall_back_to_defaults() {
        assert_eq!(
            EmbedOptions::from_value(&Value::Null),
            (EmbedOptions::default(), Vec::new())
        );
        let (_, problems) = EmbedOptions::from_value(&json!("bottom-left"));
        assert_eq!(problems, vec![OptionsError::NotAnObject]);
    }

    #[test]
    fn container_is_pinned_to_requested_corner() {
        let options = EmbedOptions {
            position: Position::BottomLeft,
            ..EmbedOptions::default()
        };
        let styles = options.container_styles();
        assert!(styles.contains(&("position", "fixed")));
        assert!(styles.contains(&("z-index", "999999")));
        assert!(styles.contains(&("bottom", "24px")));
        assert!(styles.contains(&("left", "24px")));
        assert!(!styles.iter().any(|(prop, _)| *prop == "right"));
    }

    #[test]
    fn init_twice_mounts_once_and_destroy_unmounts() {
        let mut host = EmbedHost::new(CountingMounter::default());
        assert!(!host.destroy());
        assert_eq!(host.init(EmbedOptions::default()), Ok(true));
        assert_eq!(host.init(EmbedOptions::default()), Ok(false));
        assert_eq!(host.mounter().mounts, 1);
        assert!(host.destroy());
        assert_eq!(host.mounter().live, 0);
        assert!(!host.is_mounted());
        assert_eq!(host.init(EmbedOptions::default()), Ok(true));
        assert_eq!(host.mounter().mounts, 2);
    }

    #[test]
    fn failed_mount_leaves_host_unmounted() {
        let mut host = EmbedHost::new(FailingMounter);
        assert!(host.init(EmbedOptions::default()).is_err());
        assert!(!host.is_mounted());
        assert!(!host.destroy());
    }

    #[test]
    fn queued_calls_keep_their_order() {
        let queue = json!([
            ["init", { "position": "top-left" }],
            ["destroy"],
            ["init"],
            ["refresh"],
            "init",
            [],
        ]);
        assert_eq!(
            queued_calls(&queue),
            vec![
                QueuedCall::Init(json!({ "position": "top-left" })),
                QueuedCall::Destroy,
                QueuedCall::Init(Value::Null),
            ]
        );
        assert!(queued_calls(&Value::Null).is_empty());
        assert!(queued_calls(&json!({ "q": [] })).is_empty());
    }

    #[test]
    fn auto_init_respects_opt_out_and_ready_state() {
        assert_eq!(auto_init_plan(Some("false"), ReadyState::Complete), AutoInit::Skip);
        assert_eq!(auto_init_plan(None, ReadyState::Loading), AutoInit::OnDomReady);
        assert_eq!(auto_init_plan(Some("true"), ReadyState::Interactive), AutoInit::Now);
        assert_eq!(auto_init_plan(Some(""), ReadyState::Complete), AutoInit::Now);
    }
}
