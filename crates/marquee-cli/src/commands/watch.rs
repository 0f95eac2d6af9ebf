use std::future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use marquee_core::display::{DisplayEngine, Rotation};
use marquee_core::AppConfig;

/// One published change, as printed
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum WatchEvent {
    Text {
        at: DateTime<Local>,
        index: usize,
        generation: u64,
        step: u64,
        value: String,
    },
    Caret {
        at: DateTime<Local>,
        visible: bool,
    },
}

impl WatchEvent {
    fn text(rotation: &Rotation) -> Self {
        let token = rotation.token();
        WatchEvent::Text {
            at: Local::now(),
            index: rotation.index(),
            generation: token.generation,
            step: token.step,
            value: rotation.value().to_string(),
        }
    }

    fn caret(visible: bool) -> Self {
        WatchEvent::Caret {
            at: Local::now(),
            visible,
        }
    }

    fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string(self)?);
        }
        Ok(match self {
            WatchEvent::Text {
                at, index, step, value, ..
            } => format!("{} text  #{:<3} [{}] {}", at.format("%H:%M:%S%.3f"), step, index, value),
            WatchEvent::Caret { at, visible } => format!(
                "{} caret {}",
                at.format("%H:%M:%S%.3f"),
                if *visible { "on" } else { "off" }
            ),
        })
    }
}

pub async fn run(
    config: &AppConfig,
    section_id: Option<&str>,
    duration_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let section = match section_id {
        Some(id) => config
            .section(id)
            .ok_or_else(|| anyhow!("No section with id '{}'", id))?,
        None => config
            .sections
            .first()
            .ok_or_else(|| anyhow!("No sections configured"))?,
    };

    let mut engine = DisplayEngine::new(config.display_config(section))?;
    engine.activate()?;
    info!(section = %section.id, "Watching display");

    let mut text_rx = engine
        .text_binding()
        .controller()
        .map(|c| c.subscribe())
        .ok_or_else(|| anyhow!("text rotation did not start"))?;
    let mut caret_rx = engine.cursor_binding().controller().map(|c| c.subscribe());

    if let Some(rotation) = text_rx.borrow_and_update().as_ref() {
        println!("{}", WatchEvent::text(rotation).render(json)?);
    }
    if let Some(rx) = caret_rx.as_mut() {
        let visible = *rx.borrow_and_update();
        println!("{}", WatchEvent::caret(visible).render(json)?);
    }

    let deadline = async {
        match duration_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => future::pending().await,
        }
    };
    tokio::pin!(deadline);

    let mut changes = 0u64;
    loop {
        let caret_changed = async {
            match caret_rx.as_mut() {
                Some(rx) => rx.changed().await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
            changed = text_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let event = text_rx.borrow_and_update().as_ref().map(WatchEvent::text);
                if let Some(event) = event {
                    println!("{}", event.render(json)?);
                    changes += 1;
                }
            }
            changed = caret_changed => {
                if changed.is_err() {
                    break;
                }
                if let Some(rx) = caret_rx.as_mut() {
                    let visible = *rx.borrow_and_update();
                    println!("{}", WatchEvent::caret(visible).render(json)?);
                    changes += 1;
                }
            }
        }
    }

    engine.deactivate();
    info!(changes, "Watch finished");
    Ok(())
}
