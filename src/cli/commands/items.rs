use serde_json::json;

use crate::cli::config::CliContext;
use crate::cli::utils::{confirm, format_item, output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::models::ItemType;
use crate::desk::{ItemDraft, ItemFilter};

pub async fn list(ctx: &CliContext, search: Option<String>, item_type: Option<ItemType>) -> anyhow::Result<()> {
    let desk = ctx.desk().await?;
    let filter = ItemFilter::new(search.unwrap_or_default(), item_type);
    let items = desk.visible(&filter);

    if items.is_empty() {
        let message = if desk.items().is_empty() {
            "No items yet. Add one with 'desk add'"
        } else {
            "No items match"
        };
        return output_empty_collection(&ctx.output, "items", message);
    }

    match ctx.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "items": items }))?),
        OutputFormat::Text => {
            for item in items {
                println!("{}", format_item(item));
            }
        }
    }
    Ok(())
}

pub async fn add(ctx: &CliContext, item_type: ItemType, name: String, body: String) -> anyhow::Result<()> {
    let draft = match item_type {
        ItemType::Task => ItemDraft::task(name, body),
        ItemType::Article => ItemDraft::article(name, body),
        ItemType::Youtube => ItemDraft::youtube(name, body),
        ItemType::Image => ItemDraft::image(name, body),
    };
    // Reject before any request goes out
    draft.normalize()?;

    let mut desk = ctx.desk().await?;
    let item = desk.add(&draft).await?;

    output_success(
        &ctx.output,
        &format!("Added {} '{}'", item.item_type, item.title()),
        Some(json!({ "item": item })),
    )
}

pub async fn toggle(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    let mut desk = ctx.desk().await?;
    let id = desk.resolve(id)?;
    let item = desk.toggle_done(id).await?;

    let state = if item.done { "done" } else { "not done" };
    output_success(
        &ctx.output,
        &format!("Marked '{}' as {}", item.title(), state),
        Some(json!({ "item": item })),
    )
}

pub async fn delete(ctx: &CliContext, id: &str, yes: bool) -> anyhow::Result<()> {
    let mut desk = ctx.desk().await?;
    let id = desk.resolve(id)?;
    desk.request_delete(id)?;

    let title = desk.get(id).map(|item| item.title().to_string()).unwrap_or_default();
    if !yes && !confirm(&format!("Delete '{}'?", title))? {
        desk.cancel_delete();
        return output_success(&ctx.output, "Delete cancelled", Some(json!({ "deleted": false })));
    }

    let id = desk.confirm_delete().await?;
    output_success(
        &ctx.output,
        &format!("Deleted '{}'", title),
        Some(json!({ "deleted": true, "id": id })),
    )
}
