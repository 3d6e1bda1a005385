//! Invocation commands
//!
//! An incoming invocation is a function name plus a list of string arguments.
//! It is turned into a [`Command`] once, at the boundary, and everything
//! behind the boundary matches on [`Function`] instead of on strings.

use std::fmt;

/// Function names

pub const INIT: &str = "init";
pub const TRANSFER: &str = "transfer";
pub const QUERY: &str = "query";
pub const PUT: &str = "put";
pub const DEL: &str = "del";

/// **The function an invocation asks for**
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Function {
    Init,
    Transfer,
    Query,
    Put,
    Delete,
    /// Any name that isn't recognized; executed as [`Function::Transfer`]
    Unknown(String),
}

impl Function {
    /// **Resolves a function name by exact, case-sensitive match**
    pub fn from_name(name: &str) -> Self {
        match name {
            INIT => Function::Init,
            TRANSFER => Function::Transfer,
            QUERY => Function::Query,
            PUT => Function::Put,
            DEL => Function::Delete,
            other => Function::Unknown(other.to_string()),
        }
    }

    /// **The function that is actually executed**
    ///
    /// Unknown names fall back to a transfer.
    pub fn effective(&self) -> Function {
        match self {
            Function::Unknown(_) => Function::Transfer,
            known => known.clone(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Init => write!(f, "{INIT}"),
            Function::Transfer => write!(f, "{TRANSFER}"),
            Function::Query => write!(f, "{QUERY}"),
            Function::Put => write!(f, "{PUT}"),
            Function::Delete => write!(f, "{DEL}"),
            Function::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// **A single invocation, ready for execution**
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub function: Function,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(function: &str, args: &[String]) -> Self {
        Command {
            function: Function::from_name(function),
            args: args.to_vec(),
        }
    }
}
