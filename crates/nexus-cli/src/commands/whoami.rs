//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use crate::context::CliContext;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(ctx: &CliContext, _args: WhoamiArgs) -> Result<()> {
    let username = ctx.require_login().await?;

    output::field("Username", &username);
    output::field("API", ctx.client.api().as_str());

    Ok(())
}
