use serde_json::json;

use crate::auth::password::{is_valid_email, strength, unmet_requirements};
use crate::cli::config::CliContext;
use crate::cli::utils::{output_success, password_or_prompt};
use crate::cli::OutputFormat;
use crate::client::ClientError;
use crate::desk::Session;
use crate::types::{LoginRequest, RegisterRequest};

pub async fn register(
    ctx: &CliContext,
    username: String,
    email: String,
    password: Option<String>,
) -> anyhow::Result<()> {
    if !is_valid_email(email.trim()) {
        return Err(anyhow::anyhow!("Enter a valid email address"));
    }

    let password = password_or_prompt(password)?;
    let unmet = unmet_requirements(&password);
    if !unmet.is_empty() {
        return Err(anyhow::anyhow!("Password is too weak: {}", unmet.join("; ")));
    }
    tracing::debug!("Password strength: {:?}", strength(&password));

    let request = RegisterRequest {
        username,
        email,
        password,
    };
    let auth = ctx.client()?.register(&request).await?;
    let session = Session::sign_in(&mut *ctx.storage()?, auth)?;

    let name = session.user().map(|u| u.username.clone()).unwrap_or_default();
    output_success(
        &ctx.output,
        &format!("Registered and signed in as {}", name),
        Some(json!({ "user": session.user() })),
    )
}

pub async fn login(ctx: &CliContext, login: String, password: Option<String>) -> anyhow::Result<()> {
    let password = password_or_prompt(password)?;
    let auth = ctx.client()?.login(&LoginRequest { login, password }).await?;
    let session = Session::sign_in(&mut *ctx.storage()?, auth)?;

    let name = session.user().map(|u| u.username.clone()).unwrap_or_default();
    output_success(
        &ctx.output,
        &format!("Signed in as {}", name),
        Some(json!({ "user": session.user() })),
    )
}

pub fn logout(ctx: &CliContext) -> anyhow::Result<()> {
    Session::sign_out(&mut *ctx.storage()?)?;
    output_success(&ctx.output, "Signed out", None)
}

pub fn guest(ctx: &CliContext) -> anyhow::Result<()> {
    let session = Session::start_guest(&mut *ctx.storage()?)?;
    output_success(
        &ctx.output,
        "Continuing as Guest. Items stay on this machine.",
        Some(json!({ "user": session.user() })),
    )
}

pub async fn whoami(ctx: &CliContext) -> anyhow::Result<()> {
    let session = ctx.session()?;

    let (kind, user) = match &session {
        Session::Authenticated { token, .. } => {
            let client = ctx.client()?.with_token(token.clone());
            match client.profile().await {
                Ok(profile) => ("user", json!(profile)),
                Err(ClientError::Api { status, .. }) if status == reqwest::StatusCode::UNAUTHORIZED => {
                    return Err(anyhow::anyhow!("Session expired. Run 'desk login' again"));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Session::Guest { user } => ("guest", json!(user)),
        Session::Anonymous => ("anonymous", serde_json::Value::Null),
    };

    match ctx.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "session": kind, "user": user }))?);
        }
        OutputFormat::Text => match user.get("username").and_then(|u| u.as_str()) {
            Some(name) => println!("{} ({})", name, kind),
            None => println!("Not signed in"),
        },
    }
    Ok(())
}
