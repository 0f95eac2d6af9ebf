use anyhow::Result;
use serde::Serialize;

use marquee_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    if config.sections.is_empty() {
        println!("No sections configured.");
        return Ok(());
    }

    println!("Sections ({}):\n", config.sections.len());

    for (i, section) in config.sections.iter().enumerate() {
        let display = config.display_config(section);
        let caret = display
            .cursor_interval_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "off".to_string());

        println!("  {}. {} - {}", i + 1, section.id, section.title);
        println!(
            "    text: {}ms  caret: {}  transition: {}ms {} ({})",
            display.text_interval_ms,
            caret,
            display.transition_duration_ms,
            serde_name(&display.style),
            serde_name(&display.easing),
        );
        if let Err(e) = display.validate() {
            println!("    [ERROR: {}]", e);
        }
        for entry in &display.content {
            println!("    - {}", entry);
        }
        println!();
    }

    Ok(())
}

/// The name a value is spelled with in the config file
fn serde_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
