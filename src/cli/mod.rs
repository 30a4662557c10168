pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::database::models::ItemType;

#[derive(Parser)]
#[command(name = "desk")]
#[command(about = "Digital Desk - tasks, articles, videos and images from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "DESK_API_URL", help = "API base URL")]
    pub api_url: Option<String>,

    #[arg(long, global = true, env = "DESK_STORAGE_DIR", help = "Directory holding local storage")]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an account and sign in")]
    Register {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Sign in with username or email")]
    Login {
        #[arg(help = "Username or email")]
        login: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored token and user")]
    Logout,

    #[command(about = "Continue as guest, keeping items on this machine only")]
    Guest,

    #[command(about = "Show the current session")]
    Whoami,

    #[command(about = "List items, newest first")]
    List {
        #[arg(long, short, help = "Case-insensitive text to look for in name or description")]
        search: Option<String>,
        #[arg(long = "type", short = 't', help = "Only show one kind: task, article, youtube, image")]
        item_type: Option<ItemType>,
    },

    #[command(about = "Add an item")]
    Add {
        #[arg(long = "type", short = 't', default_value = "task", help = "task, article, youtube or image")]
        item_type: ItemType,
        #[arg(long, short, default_value = "", help = "Item name (required for tasks)")]
        name: String,
        #[arg(help = "Description for tasks, text for articles, URL for videos and images")]
        body: String,
    },

    #[command(about = "Flip an item between done and not done")]
    Toggle {
        #[arg(help = "Item id or unique id prefix")]
        id: String,
    },

    #[command(about = "Delete an item after confirmation")]
    Delete {
        #[arg(help = "Item id or unique id prefix")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "Check API health")]
    Health,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = config::CliContext::load(cli.api_url, cli.storage_dir, output_format)?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&ctx, username, email, password).await,
        Commands::Login { login, password } => commands::auth::login(&ctx, login, password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Guest => commands::auth::guest(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::List { search, item_type } => commands::items::list(&ctx, search, item_type).await,
        Commands::Add { item_type, name, body } => commands::items::add(&ctx, item_type, name, body).await,
        Commands::Toggle { id } => commands::items::toggle(&ctx, &id).await,
        Commands::Delete { id, yes } => commands::items::delete(&ctx, &id, yes).await,
        Commands::Health => commands::server::health(&ctx).await,
    }
}
