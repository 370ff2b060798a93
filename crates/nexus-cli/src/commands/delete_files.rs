//! File deletion command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::CliContext;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteFilesArgs {
    /// Ids of the files to delete
    #[arg(required = true)]
    pub file_ids: Vec<String>,
}

pub async fn run(ctx: &CliContext, args: DeleteFilesArgs) -> Result<()> {
    let username = ctx.require_login().await?;

    let message = ctx
        .client
        .delete_files(&username, &args.file_ids)
        .await
        .context("Failed to delete files")?;

    output::success(&message);
    Ok(())
}
