//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{delete_files, files, login, logout, reprocess, search, upload, whoami};

/// CLI for the NexusMind document ingestion and search backend.
#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL (defaults to $NEXUS_API, then http://localhost:8001)
    #[arg(long, global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a session (login)
    Login(login::LoginArgs),

    /// End the session and clear the stored credential
    Logout(logout::LogoutArgs),

    /// Verify the stored session and display the identity
    Whoami(whoami::WhoamiArgs),

    /// Upload documents for ingestion
    Upload(upload::UploadArgs),

    /// List uploaded files
    Files(files::FilesArgs),

    /// Delete uploaded files by id
    DeleteFiles(delete_files::DeleteFilesArgs),

    /// Re-run ingestion for an uploaded file
    Reprocess(reprocess::ReprocessArgs),

    /// Search ingested documents
    Search(search::SearchArgs),
}
