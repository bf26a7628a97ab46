//! HTTP clients for the classification backends.

pub mod hosted;
pub mod r_server;

pub use hosted::HostedClient;
pub use r_server::RServerClient;

use serde::de::DeserializeOwned;

use crate::error::{RelayError, RelayResult};

/// Check the status of a backend response and decode its JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> RelayResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RelayError::BackendStatus {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| RelayError::malformed(e.to_string()))
}
