//! Upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use nexusmind_core::FileStatus;

use crate::context::CliContext;
use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Documents to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

pub async fn run(ctx: &CliContext, args: UploadArgs) -> Result<()> {
    let username = ctx.require_login().await?;

    for path in &args.paths {
        anyhow::ensure!(path.is_file(), "Not a file: {}", path.display());
    }

    eprintln!("{}", "Uploading...".dimmed());

    let result = ctx
        .client
        .upload_files(&username, &args.paths)
        .await
        .context("Failed to upload files")?;

    output::success(&result.message);
    for file in &result.files {
        output::field(&file.name, status_str(file.status));
    }

    Ok(())
}

fn status_str(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Processing => "processing",
        FileStatus::Completed => "completed",
        FileStatus::Failed => "failed",
    }
}
