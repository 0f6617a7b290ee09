//! Epoch to wall-clock conversion, used for log output only.

use chrono::{DateTime, TimeZone, Utc};
use fvm_shared::clock::ChainEpoch;

const EPOCH_DURATION_SECONDS: i64 = 30;

/// Mainnet genesis, 2020-08-24T22:00:00Z.
const MAINNET_GENESIS: i64 = 1_598_306_400;

/// Approximate UTC time at which `epoch` starts on mainnet.
///
/// Testnets and devnets each have their own genesis, which a `t` address
/// does not identify, so there is no counterpart for them. Null rounds are
/// not accounted for. Returns `None` outside chrono's representable range.
pub fn mainnet_epoch_to_utc(epoch: ChainEpoch) -> Option<DateTime<Utc>> {
    let offset = epoch.checked_mul(EPOCH_DURATION_SECONDS)?;
    let secs = MAINNET_GENESIS.checked_add(offset)?;
    Utc.timestamp_opt(secs, 0).single()
}
