//! REST client for the recirculator device-control service.
//!
//! Wraps the upstream HTTP API (power control, target temperature,
//! telemetry) using [`reqwest`]. Every call is a single attempt bounded
//! by the configured timeout; retry policy is left to callers.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::DeviceConfig;
use crate::types::{PowerState, RecirculatorStatus, TemperatureReading};

/// HTTP client for the device-control service.
pub struct RecirculatorApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the device-control REST layer.
#[derive(Debug, thiserror::Error)]
pub enum RecirculatorApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Device request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Device API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the payload was unusable
    /// (undecodable, or a physically implausible temperature).
    #[error("Invalid device payload: {0}")]
    InvalidPayload(String),
}

impl RecirculatorApi {
    /// Create a new API client from device configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens on invalid TLS configuration -- fail fast at startup.
    pub fn new(config: &DeviceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to build device HTTP client");
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current power state of a device. Sends `GET /devices/{id}/state`.
    pub async fn get_state(&self, device_id: &str) -> Result<PowerState, RecirculatorApiError> {
        let response = self
            .client
            .get(format!("{}/devices/{device_id}/state", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Switch the recirculation pump on. Sends `POST /devices/{id}/turn-on`
    /// and returns the resulting power state.
    pub async fn turn_on(&self, device_id: &str) -> Result<PowerState, RecirculatorApiError> {
        let response = self
            .client
            .post(format!("{}/devices/{device_id}/turn-on", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Switch the recirculation pump off. Sends `POST /devices/{id}/turn-off`
    /// and returns the resulting power state.
    pub async fn turn_off(&self, device_id: &str) -> Result<PowerState, RecirculatorApiError> {
        let response = self
            .client
            .post(format!("{}/devices/{device_id}/turn-off", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Set the recirculation target temperature.
    ///
    /// Sends `PUT /devices/{id}/max-temperature`. The value must already
    /// be validated against the [20, 35] °C bounds -- the API layer
    /// rejects out-of-range input before this call is attempted.
    pub async fn set_max_temperature(
        &self,
        device_id: &str,
        max_temperature: f64,
    ) -> Result<(), RecirculatorApiError> {
        let body = serde_json::json!({ "max_temperature": max_temperature });
        let response = self
            .client
            .put(format!(
                "{}/devices/{device_id}/max-temperature",
                self.base_url
            ))
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Most recent temperature measurement.
    ///
    /// Sends `GET /devices/{id}/last-temperature`. Implausible readings
    /// (outside [0, 100] °C, e.g. disconnected-probe sentinels) are
    /// rejected as [`RecirculatorApiError::InvalidPayload`].
    pub async fn get_last_temperature(
        &self,
        device_id: &str,
    ) -> Result<TemperatureReading, RecirculatorApiError> {
        let response = self
            .client
            .get(format!(
                "{}/devices/{device_id}/last-temperature",
                self.base_url
            ))
            .send()
            .await?;
        let reading: TemperatureReading = Self::parse_response(response).await?;

        if !reading.is_plausible() {
            return Err(RecirculatorApiError::InvalidPayload(format!(
                "Reported temperature {} is outside the plausible range",
                reading.value
            )));
        }
        Ok(reading)
    }

    /// Full device status snapshot. Sends `GET /devices/{id}/status`.
    pub async fn get_status(
        &self,
        device_id: &str,
    ) -> Result<RecirculatorStatus, RecirculatorApiError> {
        let response = self
            .client
            .get(format!("{}/devices/{device_id}/status", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Check the status code and decode a JSON payload.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RecirculatorApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecirculatorApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RecirculatorApiError::InvalidPayload(e.to_string()))
    }

    /// Check the status code of a response with no interesting body.
    async fn check_status(response: reqwest::Response) -> Result<(), RecirculatorApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecirculatorApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
