mod address;
mod claims;
mod cli;
mod commands;
mod config;
mod endpoint;
mod epoch;
mod error;
mod logging;
mod lotus;
mod report;
#[cfg(test)]
mod test_util;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::stats::run(cli).await
}
