use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;

use promptkit_core::estimator;
use promptkit_core::store::{LocalStore, PromptRecord, PromptStore};
use promptkit_core::templates::embedded;
use promptkit_core::templates::renderer::ReportRenderer;

use crate::output;

/// List a wallet's saved prompts, newest first, optionally exporting Markdown.
pub async fn run(config_path: &Path, wallet: &str, markdown: Option<&Path>) -> Result<()> {
    let ctx = super::load_context(config_path)?;
    let network = ctx.config.network()?;
    let store = LocalStore::new(&ctx.config.store_dir);

    let records = store.list(wallet).await?;

    output::print_header("promptkit history");
    output::print_key_value("Wallet", wallet);
    output::print_key_value("Network", &network.display_name);
    output::print_key_value("Saved prompts", &records.len().to_string());
    println!();

    for record in &records {
        println!(
            "  {} {}  {}",
            style(&record.template_name).bold(),
            style(format!("[{}]", record.category)).dim(),
            style(format_timestamp(record.timestamp)).dim()
        );
        println!(
            "    {}  {}",
            style(&record.prompt_id).dim(),
            estimator::format_bytes(record.generated_prompt.len() as u64)
        );
        println!("    {}", preview(&record.generated_prompt, 100));
    }

    if let Some(path) = markdown {
        let data = serde_json::json!({
            "address": wallet,
            "network": network.display_name,
            "count": records.len(),
            "records": records.iter().map(record_json).collect::<Vec<_>>(),
        });
        let report = ReportRenderer::new().render(embedded::HISTORY_MARKDOWN, &data)?;
        std::fs::write(path, report)?;
        println!();
        output::print_success(&format!("Exported {}", path.display()));
    }

    Ok(())
}

fn record_json(record: &PromptRecord) -> serde_json::Value {
    serde_json::json!({
        "prompt_id": record.prompt_id,
        "template_name": record.template_name,
        "category": record.category,
        "saved_at": format_timestamp(record.timestamp),
        "generated_prompt": record.generated_prompt,
    })
}

fn format_timestamp(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// First line of `text`, cut to `max` characters.
fn preview(text: &str, max: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > max || text.lines().nth(1).is_some() {
        let cut: String = first.chars().take(max).collect();
        format!("{cut}…")
    } else {
        first.to_string()
    }
}
