//! CLI entry points

pub mod serve;

use clap::{Parser, Subcommand};

/// dandi-gateway - API key dashboard backend
#[derive(Parser)]
#[command(name = "dandi-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
