//! Helper functions that are common to CLI apps

use crate::cli::constants::*;
use crate::command;
use crate::response::Response;
use std::io::{stdin, stdout, Write};

/// **Contains full variants of all existing commands.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_full() -> String {
    let msg = format!("{HELP} {INIT} {TRANSFER} {QUERY} {PUT} {DEL} {INVOKE} {STATE} {ID} {EXIT}");
    msg
}

/// **Contains short variants of all existing commands.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_short() -> String {
    "h i t q p d v s x".to_string()
}

/// **Prints all existing commands in their full and short variants.**
pub fn help() {
    println!("{}", help_contents_full());
    println!("{}", help_contents_short());
}

/// **Reads standard input into a line.**
///
/// Signals an empty line so we can ignore it (in the main loop).
///
/// # Panics
/// Panics in case it can't write `label` to `stdout`,
/// or if it can't flush the `stdout` buffer.
pub fn read_from_stdin(label: &str) -> Option<String> {
    let mut lock = stdout().lock();
    write!(lock, "\n{label}").expect("Failed to write the label to stdout.");
    stdout()
        .flush()
        .expect("Failed to flush the stdout buffer.");

    let mut line = String::new();
    match stdin().read_line(&mut line) {
        Ok(_) => {
            if line.trim().is_empty() {
                None
            } else {
                Some(line.to_owned())
            }
        }
        Err(err) => {
            eprintln!("[ERROR] Failed to read line: {}", err);
            None
        }
    }
}

/// **Turns a REPL line into a chaincode invocation**
///
/// The ledger commands map onto the function of the same name, and everything
/// after the command word becomes the argument list.
/// `invoke <function> [args...]` passes any function name through unchanged,
/// so unknown names reach the chaincode as they are.
///
/// Returns `None` for words that aren't invocations (help, state, ...).
/// Argument counts are not checked here; the chaincode reports them.
pub fn to_invocation(words: &[&str]) -> Option<(String, Vec<String>)> {
    let (cmd, rest) = words.split_first()?;
    let rest: Vec<String> = rest.iter().map(|w| w.to_string()).collect();

    let function = match cmd.to_lowercase().as_str() {
        INIT | "i" => command::INIT,
        TRANSFER | "t" => command::TRANSFER,
        QUERY | "q" => command::QUERY,
        PUT | "p" => command::PUT,
        DEL | "d" => command::DEL,
        INVOKE | "v" => {
            if rest.is_empty() {
                println!("The invoke command: {INVOKE} <function> [args...]");
                return None;
            }
            return Some((rest[0].clone(), rest[1..].to_vec()));
        }
        _ => return None,
    };

    Some((function.to_string(), rest))
}

/// **Prints a chaincode response**
///
/// Errors go to `stderr`, everything else to `stdout`.
pub fn print_response(response: &Response) {
    match response {
        Response::Success(msg) if msg.is_empty() => println!("OK"),
        Response::Success(msg) => println!("{}", msg),
        Response::Payload(holding) => println!(
            r#"The account "{}" holds the following amount: {}."#,
            holding.name, holding.amount
        ),
        Response::Error(msg) => eprintln!("[ERROR] {}", msg),
    }
}
