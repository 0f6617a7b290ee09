//! Plain-text claim size report.

use std::io::{self, Write};

use fvm_shared::clock::ChainEpoch;

use crate::address::ProviderAddress;
use crate::claims::ClientTotal;

/// Write the header line followed by one `Client <id>: <size>` line per row,
/// in the order given.
pub fn render<W: Write>(
    out: &mut W,
    provider: &ProviderAddress,
    start_epoch: ChainEpoch,
    end_epoch: ChainEpoch,
    rows: &[ClientTotal],
) -> io::Result<()> {
    writeln!(
        out,
        "Provider {provider} claim size statistics between epoch {start_epoch} and {end_epoch} (grouped by client):"
    )?;
    for row in rows {
        writeln!(out, "Client {}: {}", row.client, row.total_size)?;
    }
    out.flush()
}
