use asset_transfer_common::errors::StoreError;
use warp::reject::Reject;

#[derive(Debug)]
pub struct WebServiceStoreError(pub StoreError);

impl Reject for WebServiceStoreError {}
