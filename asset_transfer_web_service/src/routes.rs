//! The service's routes

use crate::handlers::{self, SharedChaincode};
use warp::{Filter, Rejection, Reply};

/// **All routes of the service, sharing one chaincode**
pub fn routes(
    chaincode: SharedChaincode,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let chaincode_state = warp::any().map(move || chaincode.clone());

    let invoke = warp::path!("invoke")
        .and(warp::post())
        .and(warp::body::content_length_limit(1024 * 16))
        .and(warp::body::json())
        .and(chaincode_state.clone())
        .and_then(handlers::invoke);

    let chaincode_id = warp::path!("id")
        .and(warp::get())
        .and(chaincode_state.clone())
        .and_then(handlers::chaincode_id);

    let state = warp::path!("state")
        .and(warp::get())
        .and(chaincode_state.clone())
        .and_then(handlers::state);

    invoke.or(chaincode_id).or(state)
}
