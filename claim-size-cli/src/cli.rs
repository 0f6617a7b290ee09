use clap::Parser;
use fvm_shared::clock::ChainEpoch;
use std::path::PathBuf;

/// Sum the claim sizes of a storage provider within an epoch range, grouped by client
#[derive(Parser, Debug)]
#[command(name = "claim-size-calculator")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Provider address (e.g. f01234)
    #[arg(long)]
    pub provider: String,

    /// First epoch (inclusive) of the claim term start range
    #[arg(long, allow_hyphen_values = true)]
    pub start: ChainEpoch,

    /// Last epoch (inclusive) of the claim term start range
    #[arg(long, allow_hyphen_values = true)]
    pub end: ChainEpoch,

    /// Lotus API endpoint, as a multiaddr or URL (overrides FULLNODE_API_INFO)
    #[arg(long, value_name = "ADDR")]
    pub api_url: Option<String>,

    /// Lotus API token
    #[arg(long)]
    pub token: Option<String>,

    /// Config file [default: ~/.claim-size-calculator/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lotus repo holding `api` and `token` files [default: ~/.lotus]
    #[arg(long, env = "LOTUS_PATH", value_name = "PATH")]
    pub repo: Option<PathBuf>,
}
