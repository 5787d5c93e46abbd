use a11y_core::{Direction, Flag, Language, STYLE_RULES, Settings, SettingsPatch};
use anyhow::{Context, Result, ensure};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use crate::logic::checks;

const FAB: &str = "button[aria-controls='a11y-panel']";
const PANEL: &str = "#a11y-panel";
const SETTLE: Duration = Duration::from_millis(150);

async fn settle() {
    tokio::time::sleep(SETTLE).await;
}

/// Load the page as a first-time visitor and open the panel.
async fn open_fresh_panel(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    driver.goto(&ctx.base_url).await?;
    ctx.bridge.clear_preferences().await?;
    driver.refresh().await?;
    ctx.bridge.ensure_widget().await?;

    driver.find(By::Css(FAB)).await?.click().await?;
    driver
        .find(By::Css(PANEL))
        .await
        .context("panel did not open after clicking the button")?;
    if ctx.verbose {
        println!("  🖱️  Opened the accessibility panel");
    }
    Ok(())
}

async fn click_switch(driver: &WebDriver, flag: Flag) -> Result<()> {
    let selector = format!("#a11y-flag-{}", flag.key());
    driver
        .find(By::Css(selector.as_str()))
        .await
        .with_context(|| format!("switch {selector} not found"))?
        .click()
        .await?;
    Ok(())
}

fn expected_style_nodes(settings: &Settings) -> Vec<String> {
    STYLE_RULES
        .iter()
        .filter(|rule| settings.flag(rule.flag))
        .map(|rule| rule.id.to_string())
        .collect()
}

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh_panel(driver, ctx).await?;

        let fab = driver.find(By::Css(FAB)).await?;
        ensure!(
            fab.attr("aria-expanded").await?.as_deref() == Some("true"),
            "button should report the panel as expanded"
        );

        // Opening saves the record, so defaults are now written to the page.
        let probe = ctx.bridge.probe().await?;
        ensure!(
            probe.font_size == "100%" && probe.style_nodes.is_empty() && !probe.dark,
            "opening the panel should apply defaults only: {probe:?}"
        );

        ctx.bridge.press_escape().await?;
        settle().await;
        ensure!(
            !ctx.bridge.has_node("a11y-panel").await?,
            "Escape should close the panel"
        );
        if ctx.verbose {
            println!("  ⌨️  Escape closed the panel");
        }
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke Test", checks::smoke))
    }
}

pub struct PanelTogglesScenario;

#[async_trait::async_trait]
impl BrowserScenario for PanelTogglesScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh_panel(driver, ctx).await?;
        let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
        let mut expected = Settings::default();

        for _ in 0..rng.gen_range(4..10) {
            let flag = *Flag::ALL.choose(&mut rng).unwrap_or(&Flag::DarkMode);
            click_switch(driver, flag).await?;
            expected.apply_patch(&SettingsPatch::with_flag(flag, !expected.flag(flag)));
            if ctx.verbose {
                println!("  🖱️  Toggled {}", flag.key());
            }
        }

        let increase = driver
            .find(By::Css("#a11y-font-size ~ button"))
            .await
            .context("text size increase button not found")?;
        for _ in 0..rng.gen_range(1..4) {
            increase.click().await?;
            if expected.can_step_font_size(Direction::Increase) {
                expected.font_size = expected.stepped_font_size(Direction::Increase);
            }
        }
        settle().await;

        let probe = ctx.bridge.probe().await?;
        if ctx.verbose {
            println!("  📊 Page probe: {probe:?}");
        }
        ensure!(
            probe.font_size == format!("{}%", expected.font_size),
            "root font-size {:?}, expected {}%",
            probe.font_size,
            expected.font_size
        );
        ensure!(probe.dark == expected.dark_mode, "dark class out of sync");
        ensure!(
            probe.style_nodes == expected_style_nodes(&expected),
            "style nodes {:?}, expected {:?}",
            probe.style_nodes,
            expected_style_nodes(&expected)
        );

        let readout = driver.find(By::Css("#a11y-font-size")).await?.text().await?;
        ensure!(
            readout.trim() == format!("{}%", expected.font_size),
            "readout shows {readout:?}"
        );
        Ok(())
    }
}

impl CombinedScenario for PanelTogglesScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "Random Panel Interactions",
            checks::random_interactions,
        ))
    }
}

pub struct PersistenceScenario;

#[async_trait::async_trait]
impl BrowserScenario for PersistenceScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh_panel(driver, ctx).await?;
        click_switch(driver, Flag::DarkMode).await?;
        click_switch(driver, Flag::HighlightLinks).await?;
        settle().await;

        driver.refresh().await?;
        ctx.bridge.ensure_widget().await?;
        settle().await;

        let probe = ctx.bridge.probe().await?;
        ensure!(probe.dark, "dark mode lost on reload");
        ensure!(
            probe.style_nodes == vec!["a11y-highlight-links".to_string()],
            "reload restored {:?}",
            probe.style_nodes
        );
        Ok(())
    }
}

impl CombinedScenario for PersistenceScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Preferences Survive Reload", checks::persistence))
    }
}

pub struct LanguageScenario;

#[async_trait::async_trait]
impl BrowserScenario for LanguageScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        open_fresh_panel(driver, ctx).await?;
        ctx.bridge
            .choose_option("a11y-language", Language::Es.code())
            .await?;
        settle().await;

        let probe = ctx.bridge.probe().await?;
        ensure!(
            probe.lang.as_deref() == Some("es"),
            "root language attribute is {:?}",
            probe.lang
        );
        let title = driver.find(By::Id("a11y-panel-title")).await?.text().await?;
        ensure!(title.trim() == "Accesibilidad", "panel title still {title:?}");

        driver.refresh().await?;
        ctx.bridge.ensure_widget().await?;
        let probe = ctx.bridge.probe().await?;
        ensure!(
            probe.lang.as_deref() == Some("es"),
            "language not restored on reload: {:?}",
            probe.lang
        );
        Ok(())
    }
}

impl CombinedScenario for LanguageScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Language Switching", checks::language_sync))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_nodes_follow_rule_order() {
        let settings = Settings {
            page_structure: true,
            highlight_links: true,
            dark_mode: true,
            ..Settings::default()
        };
        assert_eq!(
            expected_style_nodes(&settings),
            vec!["a11y-highlight-links", "a11y-page-structure"]
        );
    }
}
