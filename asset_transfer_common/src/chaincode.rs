//! The invocation entry point
//!
//! Hosts hand every `(function, args)` pair to [`Chaincode::invoke`].

use crate::command::{Command, Function};
use crate::errors::{ChaincodeError, StoreError};
use crate::ledger::LedgerTransition;
use crate::response::Response;
use crate::store::StateStore;
use std::fmt;

pub const DEFAULT_CHAINCODE_NAME: &str = "asset_transfer";
pub const DEFAULT_CHAINCODE_VERSION: &str = "0";
pub const DEFAULT_CHAIN_ID: &str = "testchainid";

/// **The identity a chaincode reports to its host**
///
/// Rendered as `<name>:<version>/<chain-id>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChaincodeId {
    pub name: String,
    pub version: String,
    pub chain_id: String,
}

impl ChaincodeId {
    pub fn new(name: &str, version: &str, chain_id: &str) -> Self {
        ChaincodeId {
            name: name.to_string(),
            version: version.to_string(),
            chain_id: chain_id.to_string(),
        }
    }
}

impl Default for ChaincodeId {
    fn default() -> Self {
        ChaincodeId::new(
            DEFAULT_CHAINCODE_NAME,
            DEFAULT_CHAINCODE_VERSION,
            DEFAULT_CHAIN_ID,
        )
    }
}

impl fmt::Display for ChaincodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.name, self.version, self.chain_id)
    }
}

/// Routes invocations to the ledger and shapes the outcome into a [`Response`].
#[derive(Debug)]
pub struct Chaincode<S> {
    id: ChaincodeId,
    ledger: LedgerTransition<S>,
}

impl<S: StateStore> Chaincode<S> {
    /// **Creates a chaincode with the default identity over `store`.**
    pub fn new(store: S) -> Self {
        Self::with_id(ChaincodeId::default(), store)
    }

    pub fn with_id(id: ChaincodeId, store: S) -> Self {
        Chaincode {
            id,
            ledger: LedgerTransition::new(store),
        }
    }

    pub fn id(&self) -> &ChaincodeId {
        &self.id
    }

    pub fn ledger(&self) -> &LedgerTransition<S> {
        &self.ledger
    }

    /// **Handles one invocation**
    ///
    /// Business errors come back as [`Response::Error`].
    ///
    /// # Errors
    /// - The state store failed; the invocation is abandoned and the
    ///   [`StoreError`] is handed to the host.
    pub fn invoke(&mut self, function: &str, args: &[String]) -> Result<Response, StoreError> {
        log::info!("In run, function:{}", function);

        let command = Command::new(function, args);
        match self.execute(&command) {
            Ok(response) => Ok(response),
            Err(ChaincodeError::State(err)) => {
                log::error!("{}: {}", command.function, err);
                Err(err)
            }
            Err(err) => {
                log::debug!("{}: {:?}", command.function, err);
                Ok(Response::from(&err))
            }
        }
    }

    /// **Runs an already-parsed command**
    ///
    /// [`Function::Unknown`] is executed as a transfer.
    pub fn execute(&mut self, command: &Command) -> Result<Response, ChaincodeError> {
        let args = command.args.as_slice();

        match command.function.effective() {
            Function::Init => self.ledger.init(args),
            Function::Query => self.ledger.query(args),
            Function::Put => self.ledger.put(args),
            Function::Delete => self.ledger.del(args),
            Function::Transfer | Function::Unknown(_) => self.ledger.transfer(args),
        }
    }
}
