use crate::command::Function;
use std::error::Error;
use std::fmt;

/// **An application-specific error type**
///
/// Every variant is recoverable by the caller: it ends the current invocation
/// and is reported back as a [`crate::response::Response::Error`].
///
/// The only non-business variant is [`ChaincodeError::State`], which wraps a
/// failure of the underlying state store; the dispatcher propagates it instead
/// of turning it into a response.
#[derive(Debug, PartialEq)]
pub enum ChaincodeError {
    /// The number of arguments doesn't fit the invoked function
    InvalidArgumentCount(Function, usize),
    /// A stored balance (or a balance to be stored) is not an integer;
    /// carries the account name where the caller knows it
    InvalidBalanceFormat(Option<String>),
    InvalidAmountFormat,
    AccountNotFound(String),
    InsufficientFunds,
    /// The new balance of the named account doesn't fit into `i64`
    BalanceOverflow(String),
    State(StoreError),
}

impl ChaincodeError {
    /// **Renders the error as `{"Error":"..."}`**
    ///
    /// This is the message shape callers of the chaincode expect inside
    /// an error response.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "Error": self.to_string() }).to_string()
    }
}

impl fmt::Display for ChaincodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChaincodeError::InvalidArgumentCount(function, _) => match function {
                Function::Init => write!(f, "Incorrect number of arguments. Expecting 4"),
                Function::Query => write!(
                    f,
                    "Incorrect number of arguments. Expecting name of the person to query"
                ),
                Function::Put => write!(
                    f,
                    "Incorrect number of arguments. Expecting key/value pairs"
                ),
                Function::Delete => write!(
                    f,
                    "Incorrect number of arguments. Expecting keys to delete"
                ),
                Function::Transfer | Function::Unknown(_) => write!(
                    f,
                    "Incorrect number of arguments. Expecting 3: from, to, amount"
                ),
            },
            ChaincodeError::InvalidBalanceFormat(Some(name)) => {
                write!(f, "Expecting integer value for asset holding of {} ", name)
            }
            ChaincodeError::InvalidBalanceFormat(None) => {
                write!(f, "Expecting integer value for asset holding")
            }
            ChaincodeError::InvalidAmountFormat => write!(f, "Expecting integer value for amount "),
            ChaincodeError::AccountNotFound(name) => write!(f, "Failed to get state for {}", name),
            ChaincodeError::InsufficientFunds => write!(
                f,
                "Insufficient asset holding value for requested transfer amount "
            ),
            ChaincodeError::BalanceOverflow(name) => {
                write!(f, "Asset holding of {} would overflow", name)
            }
            ChaincodeError::State(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ChaincodeError {}

impl From<StoreError> for ChaincodeError {
    fn from(err: StoreError) -> Self {
        ChaincodeError::State(err)
    }
}

/// **A failure of the state store itself**
///
/// Not a business error; it is fatal for the invocation that hit it.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State store failure: {}", self.0)
    }
}

impl Error for StoreError {}
