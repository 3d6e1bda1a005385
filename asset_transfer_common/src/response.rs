use crate::errors::ChaincodeError;
use serde::{Deserialize, Serialize};

/// **The outcome of an invocation, as handed back to the host**
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Response {
    Success(String),
    /// A successful query
    Payload(AccountHolding),
    /// Always a `{"Error":"..."}` JSON string
    Error(String),
}

impl Response {
    pub fn is_success(&self) -> bool {
        !matches!(self, Response::Error(_))
    }
}

impl From<&ChaincodeError> for Response {
    fn from(err: &ChaincodeError) -> Self {
        Response::Error(err.to_json())
    }
}

/// **A queried account and its balance**
///
/// The amount is the stored string, not a re-rendered number.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccountHolding {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}
