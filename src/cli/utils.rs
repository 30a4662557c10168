use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::cli::OutputFormat;
use crate::database::models::Item;
use crate::desk::classify::{classify, link_target};

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: []
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// One card, as a couple of lines of text
pub fn format_item(item: &Item) -> String {
    let check = if item.done { "[x]" } else { "[ ]" };
    let short_id = &item.id.to_string()[..8];
    let kind = classify(&item.task_description);

    let mut line = format!("{} {} {:<7} {}", check, short_id, item.item_type.as_str(), item.title());
    match link_target(&item.task_description) {
        Some(url) => line.push_str(&format!("\n             {} {}", kind.label(), url)),
        None if !item.task_description.is_empty() => {
            line.push_str(&format!("\n             {}", item.task_description))
        }
        None => {}
    }
    line
}

pub fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Use the provided password or read one from stdin
pub fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt("Password"),
    }
}

pub fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{ItemType, NewItem};
    use uuid::Uuid;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn item_lines_show_links() {
        let mut item = Item::new(
            Uuid::nil(),
            NewItem {
                item_type: ItemType::Youtube,
                task_name: None,
                task_description: "youtu.be/abc".into(),
            },
        );
        item.done = true;

        let text = format_item(&item);
        assert!(text.starts_with("[x] "));
        assert!(text.contains("youtube"));
        assert!(text.contains("video youtu.be/abc"));
    }
}
