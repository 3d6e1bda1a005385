use asset_transfer_common::chaincode::Chaincode;
use asset_transfer_common::cli::constants::*;
use asset_transfer_common::cli::helpers::*;
use asset_transfer_common::response::Response;
use asset_transfer_common::store::{MemoryStore, StateStore};

/// **The REPL**
///
/// Hosts a chaincode over an in-memory state store for the lifetime of the process.
pub fn main_loop() {
    let mut chaincode = Chaincode::new(MemoryStore::new());

    loop {
        if let Some(line) = read_from_stdin(PROMPT) {
            let words = line.split_whitespace().collect::<Vec<_>>();
            let cmd = words[0].to_lowercase();

            match cmd.as_str() {
                HELP | "h" => help(),
                STATE | "s" => print_state(chaincode.ledger().store()),
                ID => println!("{}", chaincode.id()),
                EXIT | "x" => break,
                _ => match to_invocation(&words) {
                    Some((function, args)) => {
                        if let Some(response) = invoke(&mut chaincode, &function, &args) {
                            print_response(&response);
                        }
                    }
                    None => println!("Unrecognized command; try `help`."),
                },
            }
        }
    }
}

/// **Runs one invocation against the local chaincode**
///
/// A state store failure is printed and yields `None`.
pub fn invoke<S: StateStore>(
    chaincode: &mut Chaincode<S>,
    function: &str,
    args: &[String],
) -> Option<Response> {
    match chaincode.invoke(function, args) {
        Ok(response) => Some(response),
        Err(err) => {
            eprintln!("[ERROR] {}", err);
            None
        }
    }
}

/// **Prints every key and its value**
fn print_state(store: &MemoryStore) {
    println!("State: {:#?}", store.entries());
}
