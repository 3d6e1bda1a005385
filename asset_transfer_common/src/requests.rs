use serde::{Deserialize, Serialize};

/// **The body of an invocation sent to the web service**
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InvokeRequest {
    pub function: String,
    pub args: Vec<String>,
}
