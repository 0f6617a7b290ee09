//! Storage provider address parsing.

use std::fmt;
use std::str::FromStr;

use fvm_shared::address::{Address, Network};

use crate::error::AddressError;

/// A validated Filecoin address identifying the provider to query.
///
/// The address is kept in the textual form it was given (after trimming) so
/// the report and the RPC call both use the network prefix the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAddress {
    text: String,
    network: Network,
    address: Address,
}

impl ProviderAddress {
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for ProviderAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let network = match text.chars().next() {
            None => return Err(AddressError::Empty),
            Some('f') => Network::Mainnet,
            Some('t') => Network::Testnet,
            Some(_) => return Err(AddressError::UnknownNetwork(text.to_string())),
        };

        let address = network
            .parse_address(text)
            .map_err(|source| AddressError::Malformed {
                input: text.to_string(),
                source,
            })?;

        Ok(Self {
            text: text.to_string(),
            network,
            address,
        })
    }
}

impl fmt::Display for ProviderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
