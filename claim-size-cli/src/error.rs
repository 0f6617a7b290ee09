//! Error types for address parsing, endpoint resolution and node calls.

use std::path::PathBuf;
use thiserror::Error;

/// A provider address string could not be parsed.
#[derive(Error, Debug)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    /// The leading character is neither the mainnet nor the testnet prefix.
    #[error("unknown network prefix in {0:?} (expected 'f' or 't')")]
    UnknownNetwork(String),

    #[error("{input:?}: {source}")]
    Malformed {
        input: String,
        #[source]
        source: fvm_shared::address::Error,
    },
}

/// No usable Lotus API endpoint could be determined.
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("invalid API endpoint {0:?}: expected a multiaddr or an http(s)/ws(s) URL")]
    InvalidEndpoint(String),

    #[error("failed to read {path}: {source}")]
    RepoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "no Lotus API endpoint configured: pass --api-url, set FULLNODE_API_INFO, \
         add [node].api_url to the config file, or run a node with a repo at {0}"
    )]
    NotConfigured(PathBuf),
}

/// A JSON-RPC call to the node failed.
#[derive(Error, Debug)]
pub enum LotusError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("node returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// A successful reply carried neither `result` nor `error`.
    #[error("response has neither a result nor an error")]
    MissingResult,

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid claim id {0:?} in response")]
    InvalidClaimId(String),
}
