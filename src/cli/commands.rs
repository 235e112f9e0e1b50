use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog", about = concat!("catalog v", env!("CARGO_PKG_VERSION"), " - browse and add projects"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the project service (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Read and write projects in a local JSON file instead of the service
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects, newest first
    List(ListArgs),
    /// Show one project
    Show(ShowArgs),
    /// Create a project
    Add(AddArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive filter over name, description and tech
    pub query: Option<String>,
    /// Only projects inside the NEW window
    #[arg(long)]
    pub new: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project name (exact)
    pub name: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Project name
    pub name: String,
    /// One-line summary
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
    /// Main language or framework
    #[arg(long, short = 't', default_value = "")]
    pub tech: String,
}
