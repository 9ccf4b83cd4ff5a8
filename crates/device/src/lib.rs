//! HTTP client for the external recirculator device-control service.
//!
//! Provides typed state/telemetry payloads, temperature-bound
//! validation, and a [`reqwest`]-based API wrapper with a configurable
//! request timeout.

pub mod api;
pub mod config;
pub mod types;

pub use api::{RecirculatorApi, RecirculatorApiError};
pub use config::DeviceConfig;
pub use types::{PowerState, RecirculatorStatus, TemperatureReading};
