//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::context::CliContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(ctx: &CliContext, args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let user = ctx
        .session
        .login(&args.username, &args.password)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Username", &user.username);
    if let Some(ref full_name) = user.full_name {
        output::field("Name", full_name);
    }
    output::field("API", ctx.client.api().as_str());

    Ok(())
}
