pub mod chaincode;
pub mod cli;
pub mod command;
pub mod errors;
pub mod ledger;
pub mod requests;
pub mod response;
pub mod store;
pub mod validation;

pub use requests::*;
