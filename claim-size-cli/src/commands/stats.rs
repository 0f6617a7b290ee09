//! claim-size-calculator stats - per-client claim size statistics for one provider

use std::io::{self, Write};

use anyhow::{Context, Result};
use fvm_shared::address::Network;
use fvm_shared::clock::ChainEpoch;

use crate::address::ProviderAddress;
use crate::claims::compute_client_totals;
use crate::cli::Cli;
use crate::endpoint::{self, Lookup, API_INFO_ENV};
use crate::epoch::mainnet_epoch_to_utc;
use crate::lotus::LotusClient;
use crate::{config, logging, report};

pub async fn run(cmd: Cli) -> Result<()> {
    let config = config::load(cmd.config.as_deref()).context("failed to load config")?;
    logging::init(&config.log.level);
    tracing::debug!(
        "Config file: {}",
        cmd.config
            .clone()
            .unwrap_or_else(config::config_path)
            .display()
    );

    let provider: ProviderAddress = cmd
        .provider
        .parse()
        .context("invalid provider address")?;
    tracing::debug!(
        "Provider {} parsed as {:?} address on {:?}",
        provider,
        provider.address().protocol(),
        provider.network()
    );

    let env_api_info = std::env::var(API_INFO_ENV).ok();
    let lookup = Lookup {
        api_url: cmd.api_url.as_deref(),
        token: cmd.token.as_deref(),
        env_api_info: env_api_info.as_deref(),
        config: Some(&config.node),
        repo: cmd.repo.as_deref(),
    };
    let (info, source) =
        endpoint::resolve(&lookup).context("failed to resolve Lotus API endpoint")?;
    tracing::info!(
        "Using Lotus API at {} (from {:?}, token: {})",
        info.url,
        source,
        if info.token.is_some() { "yes" } else { "no" }
    );

    if cmd.start > cmd.end {
        tracing::warn!(
            "Start epoch {} is after end epoch {}; no claims can match",
            cmd.start,
            cmd.end
        );
    } else if provider.network() == Network::Mainnet {
        if let (Some(from), Some(to)) = (
            mainnet_epoch_to_utc(cmd.start),
            mainnet_epoch_to_utc(cmd.end),
        ) {
            tracing::info!("Epoch window spans roughly {} to {}", from, to);
        }
    }

    let client = LotusClient::new(info);
    report_claims(&client, &provider, cmd.start, cmd.end, &mut io::stdout()).await
}

/// Fetch the provider's claims and write the report to `out`.
///
/// Nothing is written unless the fetch succeeds.
pub async fn report_claims<W: Write>(
    client: &LotusClient,
    provider: &ProviderAddress,
    start_epoch: ChainEpoch,
    end_epoch: ChainEpoch,
    out: &mut W,
) -> Result<()> {
    let claims = tokio::select! {
        result = client.state_get_claims(provider) => {
            result.context("StateGetClaims call failed")?
        }
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
    };
    tracing::debug!("Fetched {} claims for {} from {}", claims.len(), provider, client.url());

    let rows = compute_client_totals(&claims, start_epoch, end_epoch);
    tracing::info!("{} clients have claims in range", rows.len());

    report::render(out, provider, start_epoch, end_epoch, &rows)
        .context("failed to write report")
}
