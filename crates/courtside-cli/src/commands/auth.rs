//! Session commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use courtside::{Credentials, Session};

use crate::output;
use crate::session_store;

use super::api_config;

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Drop the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Force a token refresh
    Refresh,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email or phone number
    #[arg(long)]
    pub identifier: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn handle(cmd: AuthCommand, api: &str) -> Result<()> {
    match cmd {
        AuthCommand::Login(args) => login(args, api).await,
        AuthCommand::Logout => logout(),
        AuthCommand::Whoami => whoami(api).await,
        AuthCommand::Refresh => refresh(api).await,
    }
}

async fn login(args: LoginArgs, api: &str) -> Result<()> {
    let config = api_config(api)?;
    let credentials = Credentials::new(&args.identifier, &args.password);

    eprintln!("{}", "Signing in...".dimmed());

    let session = Session::login(&config, credentials)
        .await
        .context("Failed to sign in")?;

    session_store::save(&session)
        .await
        .context("Failed to save session")?;

    output::success("Signed in");
    output::field("User", session.user_id().as_str());
    output::field("API", config.base_url().as_str());

    Ok(())
}

fn logout() -> Result<()> {
    session_store::clear().context("Failed to clear session")?;
    output::success("Signed out");
    Ok(())
}

async fn whoami(api: &str) -> Result<()> {
    let config = api_config(api)?;

    match session_store::load(&config).await? {
        Some(session) => {
            output::field("User", session.user_id().as_str());
            let refreshable = session.export_refresh_token().await.is_some();
            output::field("Refreshable", if refreshable { "yes" } else { "no" });
        }
        None => {
            println!("{}", "Not signed in".dimmed());
        }
    }

    Ok(())
}

async fn refresh(api: &str) -> Result<()> {
    let config = api_config(api)?;
    let session = session_store::load(&config)
        .await?
        .context("Not signed in; run `courtside auth login` first")?;

    session.refresh().await.context("Failed to refresh")?;
    session_store::save(&session)
        .await
        .context("Failed to save session")?;

    output::success("Session refreshed");
    Ok(())
}
