//! Service configuration, read from the environment

use asset_transfer_common::chaincode::{
    ChaincodeId, DEFAULT_CHAINCODE_NAME, DEFAULT_CHAINCODE_VERSION, DEFAULT_CHAIN_ID,
};
use std::env;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "ASSET_TRANSFER_ADDR";
pub const CHAINCODE_NAME_VAR: &str = "CHAINCODE_NAME";
pub const CHAINCODE_VERSION_VAR: &str = "CHAINCODE_VERSION";
pub const CHAIN_ID_VAR: &str = "CHAIN_ID";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// **Where to listen, and which identity the hosted chaincode reports**
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub addr: SocketAddr,
    pub chaincode_id: ChaincodeId,
}

impl ServiceConfig {
    /// **Reads the configuration from environment variables**
    ///
    /// Unset variables take their defaults.
    /// An address that can't be parsed is replaced by [`DEFAULT_ADDR`] with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`], with the variables coming from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = match lookup(ADDR_VAR) {
            Some(addr) => addr.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} could not be parsed: \"{}\"; using default: {}",
                    ADDR_VAR,
                    addr,
                    DEFAULT_ADDR
                );
                default_addr()
            }),
            None => default_addr(),
        };

        let chaincode_id = ChaincodeId::new(
            &lookup(CHAINCODE_NAME_VAR).unwrap_or_else(|| DEFAULT_CHAINCODE_NAME.to_string()),
            &lookup(CHAINCODE_VERSION_VAR)
                .unwrap_or_else(|| DEFAULT_CHAINCODE_VERSION.to_string()),
            &lookup(CHAIN_ID_VAR).unwrap_or_else(|| DEFAULT_CHAIN_ID.to_string()),
        );

        ServiceConfig { addr, chaincode_id }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}
