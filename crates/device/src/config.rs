//! Device-control service configuration.

/// Default request timeout against the device-control service, seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the recirculator device-control service.
///
/// The upstream service owns the physical devices; this backend only
/// forwards commands. No retry is attempted -- a failed call surfaces
/// to the client, which can retry at its own pace.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Base HTTP URL of the device-control service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl DeviceConfig {
    /// Load device configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `RECIRCULATOR_API_URL`      | **yes**  | --      |
    /// | `RECIRCULATOR_TIMEOUT_SECS` | no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if `RECIRCULATOR_API_URL` is not set.
    pub fn from_env() -> Self {
        let base_url = std::env::var("RECIRCULATOR_API_URL")
            .expect("RECIRCULATOR_API_URL must be set in the environment");

        let request_timeout_secs: u64 = std::env::var("RECIRCULATOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("RECIRCULATOR_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }
}
