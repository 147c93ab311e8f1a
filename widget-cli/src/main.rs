//! Binary crate for the terminal weather widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the settings loop
//! - Rendering the widget's view-state as text

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
