//! Files listing command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::CliContext;
use crate::output;

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Pretty-print the file list as a JSON array
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &CliContext, args: FilesArgs) -> Result<()> {
    let username = ctx.require_login().await?;

    let files = ctx
        .client
        .list_files(&username)
        .await
        .context("Failed to list files")?;

    if args.pretty {
        output::json_pretty(&files)?;
    } else {
        // One JSON object per line, pipe-friendly
        for file in &files {
            output::json(file)?;
        }
    }

    Ok(())
}
