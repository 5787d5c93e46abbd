use anyhow::Result;
use rand_chacha::ChaCha20Rng;
use thirtyfour::prelude::*;
use thiserror::Error;

use crate::browser::WidgetBridge;
use crate::logic::checks;

pub mod embed;
pub mod panel;

/// A logic check: draws from the seeded generator, fails with context.
pub type LogicCheck = fn(&mut ChaCha20Rng) -> Result<()>;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub bridge: WidgetBridge<'a>,
    pub verbose: bool,
}

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

/// A browser run that could not apply to the page under test.
#[derive(Debug, Error)]
#[error("skipped: {0}")]
pub struct ScenarioSkipped(pub String);

impl ScenarioSkipped {
    /// Whether `err` is a skip rather than a failure.
    pub fn matches(err: &anyhow::Error) -> bool {
        err.downcast_ref::<Self>().is_some()
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;

    /// Logic-only scenarios return `false` and are left out of browser runs.
    fn has_browser(&self) -> bool {
        true
    }
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// A scenario with nothing to drive in the browser.
#[derive(Clone)]
pub struct LogicOnlyScenario {
    name: &'static str,
    check: LogicCheck,
}

impl LogicOnlyScenario {
    pub const fn new(name: &'static str, check: LogicCheck) -> Self {
        Self { name, check }
    }
}

#[async_trait::async_trait]
impl BrowserScenario for LogicOnlyScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        Err(ScenarioSkipped(format!("{} has no browser implementation", self.name)).into())
    }

    fn has_browser(&self) -> bool {
        false
    }
}

impl CombinedScenario for LogicOnlyScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(self.name, self.check))
    }
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(panel::SmokeScenario)),
        "panel-toggles" | "toggles" => Some(Box::new(panel::PanelTogglesScenario)),
        "persistence" | "reload" => Some(Box::new(panel::PersistenceScenario)),
        "language" | "i18n" => Some(Box::new(panel::LanguageScenario)),
        "embed-lifecycle" | "embed" => Some(Box::new(embed::EmbedLifecycleScenario)),
        "idempotent-effects" | "idempotence" => Some(Box::new(LogicOnlyScenario::new(
            "Idempotent Effects",
            checks::idempotent_effects,
        ))),
        "reset" => Some(Box::new(LogicOnlyScenario::new(
            "Reset Restores Defaults",
            checks::reset_restores_defaults,
        ))),
        "chat" => Some(Box::new(LogicOnlyScenario::new(
            "Chat Lifecycle",
            checks::chat_lifecycle,
        ))),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("panel-toggles", "Random Panel Interactions"),
        ("persistence", "Preferences Survive Reload"),
        ("language", "Language Switching"),
        ("embed-lifecycle", "Embed Init/Destroy Lifecycle"),
        ("idempotent-effects", "Idempotent Effects (logic only)"),
        ("reset", "Reset Restores Defaults (logic only)"),
        ("chat", "Chat Lifecycle (logic only)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("{key} not registered"));
            assert!(scenario.as_logic_scenario().is_some(), "{key} has no logic check");
        }
    }

    #[test]
    fn only_logic_only_scenarios_lack_a_browser_run() {
        let without: Vec<_> = list_scenarios()
            .into_iter()
            .filter(|(key, _)| get_scenario(key).is_some_and(|s| !s.has_browser()))
            .map(|(key, _)| key)
            .collect();
        assert_eq!(without, vec!["idempotent-effects", "reset", "chat"]);
    }

    #[test]
    fn skips_are_told_apart_from_failures() {
        let skipped: anyhow::Error = ScenarioSkipped("no embed build".into()).into();
        assert!(ScenarioSkipped::matches(&skipped));
        assert!(ScenarioSkipped::matches(&skipped.context("embed-lifecycle")));
        assert!(!ScenarioSkipped::matches(&anyhow::anyhow!("dark class out of sync")));
    }

    #[test]
    fn aliases_and_case_are_accepted() {
        assert!(get_scenario("EMBED").is_some());
        assert!(get_scenario("toggles").is_some());
        assert!(get_scenario("boss-fight").is_none());
    }
}
