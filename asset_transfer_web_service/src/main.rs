//! The "Asset Transfer Web Service's" entry point.

use asset_transfer_common::chaincode::Chaincode;
use asset_transfer_common::store::MemoryStore;
use asset_transfer_web_service::config::ServiceConfig;
use asset_transfer_web_service::routes::routes;
use std::env;
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::Filter;

/// The "Asset Transfer Web Service's" entry point.
#[tokio::main]
async fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "asset_transfer=info");
    }
    pretty_env_logger::init();

    let config = ServiceConfig::from_env();
    log::info!(
        "Hosting chaincode {} on {}",
        config.chaincode_id,
        config.addr
    );

    let log = warp::log("asset_transfer");

    let chaincode = Arc::new(Mutex::new(Chaincode::with_id(
        config.chaincode_id,
        MemoryStore::new(),
    )));

    let routes = routes(chaincode).with(log);

    // Start up the server
    warp::serve(routes).run(config.addr).await;
}
