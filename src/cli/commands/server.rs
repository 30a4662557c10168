use serde_json::json;

use crate::cli::config::CliContext;
use crate::cli::OutputFormat;

/// GET /health on the configured API
pub async fn health(ctx: &CliContext) -> anyhow::Result<()> {
    let status = ctx.client()?.health().await?;

    match ctx.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "api_url": ctx.api_url, "health": status }))?
            );
        }
        OutputFormat::Text => {
            println!("{} {}", ctx.api_url, status.status);
            println!("{}", status.message);
            println!("Store: {}", status.store);
        }
    }
    Ok(())
}
