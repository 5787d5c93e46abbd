use a11y_core::embed::CONTAINER_ID;
use a11y_core::{LANGUAGE_ATTRIBUTE, LANGUAGE_KEY, SETTINGS_KEY, STYLE_RULES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thirtyfour::prelude::*;
use thiserror::Error;

/// Name of the global the embed build installs.
pub const GLOBAL_API: &str = "SkillblendA11y";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("the accessibility button is not on the page; is --base-url serving the demo or an embed page?")]
    WidgetMissing,
    #[error("window.{GLOBAL_API} is not defined; point --base-url at a page that loads the embed build")]
    EmbedApiMissing,
    #[error("script `{script}` returned {value}")]
    UnexpectedValue { script: &'static str, value: Value },
}

/// What the page looks like from the widget's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProbe {
    pub font_size: String,
    pub filter: String,
    pub dark: bool,
    pub lang: Option<String>,
    pub style_nodes: Vec<String>,
    pub containers: u64,
}

const PROBE_SCRIPT: &str = r"
const root = document.documentElement;
const ids = arguments[0];
return {
  fontSize: root.style.getPropertyValue('font-size'),
  filter: root.style.getPropertyValue('filter'),
  dark: root.classList.contains('dark'),
  lang: root.getAttribute(arguments[1]),
  styleNodes: ids.filter((id) => document.getElementById(id) !== null),
  containers: document.querySelectorAll('#' + arguments[2]).length,
};
";

/// Thin typed layer over `execute` for reading widget state out of the page.
#[derive(Debug, Clone)]
pub struct WidgetBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> WidgetBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    async fn run_bool(&self, script: &'static str, args: Vec<Value>) -> Result<bool> {
        let ret = self.driver.execute(script, args).await?;
        let value = ret.json().clone();
        value
            .as_bool()
            .ok_or(BridgeError::UnexpectedValue { script, value })
            .map_err(Into::into)
    }

    pub async fn ensure_widget(&self) -> Result<()> {
        let found = self
            .run_bool(
                "return document.querySelector('button[aria-controls=\"a11y-panel\"]') !== null",
                vec![],
            )
            .await?;
        if found {
            Ok(())
        } else {
            Err(BridgeError::WidgetMissing.into())
        }
    }

    pub async fn ensure_embed_api(&self) -> Result<()> {
        let found = self
            .run_bool(
                "return typeof window[arguments[0]] === 'object' && typeof window[arguments[0]].init === 'function'",
                vec![GLOBAL_API.into()],
            )
            .await?;
        if found {
            Ok(())
        } else {
            Err(BridgeError::EmbedApiMissing.into())
        }
    }

    /// Forget saved preferences so each run starts from a first visit.
    pub async fn clear_preferences(&self) -> Result<()> {
        self.driver
            .execute(
                "localStorage.removeItem(arguments[0]); localStorage.removeItem(arguments[1]);",
                vec![SETTINGS_KEY.into(), LANGUAGE_KEY.into()],
            )
            .await?;
        Ok(())
    }

    pub async fn has_node(&self, id: &str) -> Result<bool> {
        self.run_bool(
            "return document.getElementById(arguments[0]) !== null",
            vec![id.into()],
        )
        .await
    }

    /// Dispatch an Escape keydown from whatever holds focus.
    pub async fn press_escape(&self) -> Result<()> {
        self.driver
            .execute(
                "(document.activeElement || document.body).dispatchEvent(new KeyboardEvent('keydown', { key: 'Escape', bubbles: true }));",
                vec![],
            )
            .await?;
        Ok(())
    }

    /// Pick a `<select>` option the way a user would, firing `change`.
    pub async fn choose_option(&self, select_id: &str, value: &str) -> Result<()> {
        self.driver
            .execute(
                "const el = document.getElementById(arguments[0]); el.value = arguments[1]; el.dispatchEvent(new Event('change', { bubbles: true }));",
                vec![select_id.into(), value.into()],
            )
            .await?;
        Ok(())
    }

    pub async fn embed_init(&self, options: Value) -> Result<()> {
        self.driver
            .execute("window[arguments[0]].init(arguments[1])", vec![GLOBAL_API.into(), options])
            .await?;
        Ok(())
    }

    pub async fn embed_destroy(&self) -> Result<()> {
        self.driver
            .execute("window[arguments[0]].destroy()", vec![GLOBAL_API.into()])
            .await?;
        Ok(())
    }

    pub async fn probe(&self) -> Result<PageProbe> {
        let ids: Vec<Value> = STYLE_RULES.iter().map(|rule| rule.id.into()).collect();
        let ret = self
            .driver
            .execute(
                PROBE_SCRIPT,
                vec![Value::Array(ids), LANGUAGE_ATTRIBUTE.into(), CONTAINER_ID.into()],
            )
            .await?;
        serde_json::from_value(ret.json().clone()).context("parsing page probe")
    }
}
