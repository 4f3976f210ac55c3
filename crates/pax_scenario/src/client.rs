//! Thin HTTP client for the simulation backend (feature `backend`).
//!
//! One request per submission, no retry, no cancellation. A failed call
//! surfaces the error and leaves the caller's rule state untouched so the
//! user can retry manually.

use reqwest::blocking::Client;
use std::time::Duration;

use crate::payload::SimulationPayload;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors encountered while submitting a scenario.
#[derive(Debug)]
pub enum BackendError {
    Http(reqwest::Error),
    Api { status: u16, body: String },
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Http(err)
    }
}

/// Blocking client for the passenger show-up generation endpoint.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    client: Client,
    endpoint: String,
}

impl SimulationClient {
    /// Create a client for the given backend endpoint
    /// (e.g. `http://localhost:8000`).
    pub fn new(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build backend client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// POST the payload to `/passenger-show-up` and return the backend's
    /// JSON response.
    pub fn create_passenger_show_up(
        &self,
        payload: &SimulationPayload,
    ) -> Result<serde_json::Value, BackendError> {
        let url = format!("{}/passenger-show-up", self.endpoint);
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .map_err(BackendError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json().map_err(BackendError::Http)
    }
}
