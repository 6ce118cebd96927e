//! Command-line interface for the folio binary.

use clap::{Parser, Subcommand};

/// Folio - portfolio site server
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default when no command is given)
    #[command(alias = "-d", alias = "--daemon")]
    Serve,

    /// Create a default config file
    #[command(alias = "--init")]
    Init,
}
