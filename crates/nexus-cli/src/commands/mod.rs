//! Command implementations.

pub mod delete_files;
pub mod files;
pub mod login;
pub mod logout;
pub mod reprocess;
pub mod search;
pub mod upload;
pub mod whoami;

use anyhow::Result;

use crate::cli::Commands;
use crate::context::CliContext;

pub async fn handle(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(ctx, args).await,
        Commands::Logout(args) => logout::run(ctx, args).await,
        Commands::Whoami(args) => whoami::run(ctx, args).await,
        Commands::Upload(args) => upload::run(ctx, args).await,
        Commands::Files(args) => files::run(ctx, args).await,
        Commands::DeleteFiles(args) => delete_files::run(ctx, args).await,
        Commands::Reprocess(args) => reprocess::run(ctx, args).await,
        Commands::Search(args) => search::run(ctx, args).await,
    }
}
