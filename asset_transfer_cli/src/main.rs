//! The "Asset Transfer CLI" app's entry point.

use asset_transfer_cli::logic::main_loop;
use std::env;

/// The "Asset Transfer CLI" app's entry point.
fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "asset_transfer=warn");
    }
    pretty_env_logger::init();

    main_loop();
}
