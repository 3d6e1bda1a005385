//! Handler functions

use crate::errors::WebServiceStoreError;
use asset_transfer_common::chaincode::Chaincode;
use asset_transfer_common::store::MemoryStore;
use asset_transfer_common::InvokeRequest;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// The hosted chaincode, shared by all handlers
///
/// The mutex serializes invocations; the chaincode itself does no locking.
pub type SharedChaincode = Arc<Mutex<Chaincode<MemoryStore>>>;

/// The `invoke` handler
///
/// Hands the function name and arguments to the chaincode and responds with
/// its [`asset_transfer_common::response::Response`].
/// Business errors are answered with `400 Bad Request`.
///
/// A failure of the state store is turned into a rejection.
///
/// POST
pub async fn invoke(
    request: InvokeRequest,
    chaincode: SharedChaincode,
) -> Result<impl Reply, Rejection> {
    log::debug!("invoke; request = {:?}", request);

    match chaincode
        .lock()
        .await
        .invoke(&request.function, &request.args)
    {
        Ok(response) => {
            let status = if response.is_success() {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            Ok(warp::reply::with_status(
                warp::reply::json(&response),
                status,
            ))
        }
        Err(store_err) => Err(warp::reject::custom(WebServiceStoreError(store_err))),
    }
}

/// The `chaincode_id` handler
///
/// Responds with `<name>:<version>/<chain-id>`.
///
/// GET /id
pub async fn chaincode_id(chaincode: SharedChaincode) -> Result<impl Reply, Infallible> {
    log::debug!("chaincode_id");
    let id = chaincode.lock().await.id().to_string();
    Ok(warp::reply::json(&id))
}

/// The `state` handler
///
/// Responds with every key and its value.
///
/// GET /state
pub async fn state(chaincode: SharedChaincode) -> Result<impl Reply, Infallible> {
    log::debug!("state");
    let chaincode = chaincode.lock().await;
    let response = warp::reply::json(chaincode.ledger().store().entries());
    Ok(response)
}
