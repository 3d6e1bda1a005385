/// CLI Commands

pub const HELP: &str = "help";
pub const INIT: &str = "init";
pub const TRANSFER: &str = "transfer";
pub const QUERY: &str = "query";
pub const PUT: &str = "put";
pub const DEL: &str = "del";
pub const INVOKE: &str = "invoke";
pub const STATE: &str = "state";
pub const ID: &str = "id";
pub const EXIT: &str = "exit";

/// Various CLI constants

pub const PROMPT: &str = "> ";
