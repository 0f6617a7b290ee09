//! Verified-registry claims and per-client size aggregation.

use std::collections::HashMap;

use fvm_shared::clock::ChainEpoch;
use fvm_shared::sector::SectorNumber;
use fvm_shared::ActorID;
use serde::{Deserialize, Serialize};

/// Root CID of the claimed piece, in the node's `{"/": "..."}` JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCid {
    #[serde(rename = "/")]
    pub cid: String,
}

/// A storage claim as returned by `Filecoin.StateGetClaims`.
///
/// Only `client`, `term_start` and `size` take part in aggregation; the
/// remaining fields are carried so the record matches the node's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Claim {
    #[serde(default)]
    pub provider: ActorID,
    pub client: ActorID,
    #[serde(default)]
    pub data: PieceCid,
    /// Padded piece size in bytes.
    pub size: u64,
    #[serde(default)]
    pub term_min: ChainEpoch,
    #[serde(default)]
    pub term_max: ChainEpoch,
    pub term_start: ChainEpoch,
    #[serde(default)]
    pub sector: SectorNumber,
}

/// One report row: a client and the summed size of its matching claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTotal {
    pub client: ActorID,
    pub total_size: u64,
}

/// Sum claim sizes per client for claims whose `term_start` lies in
/// `[start_epoch, end_epoch]`.
///
/// Rows are ordered by total size, largest first. Equal totals are ordered
/// by client id ascending so the output is reproducible.
pub fn compute_client_totals(
    claims: &[Claim],
    start_epoch: ChainEpoch,
    end_epoch: ChainEpoch,
) -> Vec<ClientTotal> {
    let mut sizes: HashMap<ActorID, u64> = HashMap::new();
    for claim in claims
        .iter()
        .filter(|c| (start_epoch..=end_epoch).contains(&c.term_start))
    {
        let total = sizes.entry(claim.client).or_default();
        *total = total.saturating_add(claim.size);
    }

    let mut rows: Vec<ClientTotal> = sizes
        .into_iter()
        .map(|(client, total_size)| ClientTotal { client, total_size })
        .collect();
    rows.sort_by(|a, b| {
        b.total_size
            .cmp(&a.total_size)
            .then_with(|| a.client.cmp(&b.client))
    });
    rows
}
