use anyhow::{Result, ensure};
use serde_json::json;
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, ScenarioSkipped, TestScenario};
use crate::browser::bridge::BridgeError;
use crate::logic::checks;

/// Drives `window.SkillblendA11y` on a page that loads the embed build.
pub struct EmbedLifecycleScenario;

#[async_trait::async_trait]
impl BrowserScenario for EmbedLifecycleScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        if let Err(err) = ctx.bridge.ensure_embed_api().await {
            return match err.downcast_ref::<BridgeError>() {
                Some(BridgeError::EmbedApiMissing) => {
                    Err(ScenarioSkipped(err.to_string()).into())
                }
                _ => Err(err),
            };
        }

        // Start from nothing whether or not the page auto-initialised.
        ctx.bridge.embed_destroy().await?;
        ensure!(
            ctx.bridge.probe().await?.containers == 0,
            "destroy left a container behind"
        );

        ctx.bridge.embed_init(json!({ "position": "top-left" })).await?;
        ctx.bridge.embed_init(json!({ "position": "bottom-left" })).await?;
        tokio::time::sleep(Duration::from_millis(150)).await;

        let probe = ctx.bridge.probe().await?;
        ensure!(
            probe.containers == 1,
            "init twice produced {} containers",
            probe.containers
        );
        ctx.bridge.ensure_widget().await?;

        let container = driver.find(By::Id(a11y_core::embed::CONTAINER_ID)).await?;
        let style = container.attr("style").await?.unwrap_or_default();
        ensure!(
            style.contains("top: 24px") || style.contains("top:24px"),
            "second init should not move the widget: {style}"
        );
        if ctx.verbose {
            println!("  📦 One container mounted with style {style:?}");
        }

        ctx.bridge.embed_destroy().await?;
        ensure!(
            ctx.bridge.probe().await?.containers == 0,
            "destroy left a container behind"
        );
        ctx.bridge.embed_destroy().await?;
        Ok(())
    }
}

impl CombinedScenario for EmbedLifecycleScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "Embed Init/Destroy Lifecycle",
            checks::embed_lifecycle,
        ))
    }
}
