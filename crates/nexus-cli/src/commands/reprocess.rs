//! Reprocess command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::CliContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ReprocessArgs {
    /// Id of the file to re-run ingestion for
    pub file_id: String,
}

pub async fn run(ctx: &CliContext, args: ReprocessArgs) -> Result<()> {
    let username = ctx.require_login().await?;

    let message = ctx
        .client
        .reprocess_file(&username, &args.file_id)
        .await
        .context("Failed to reprocess file")?;

    output::success(&message);
    Ok(())
}
