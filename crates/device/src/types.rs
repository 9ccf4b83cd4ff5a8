//! Typed payloads exchanged with the recirculator device-control service.

use serde::{Deserialize, Serialize};

/// Lowest accepted recirculation target temperature, degrees Celsius.
pub const MIN_MAX_TEMPERATURE: f64 = 20.0;

/// Highest accepted recirculation target temperature, degrees Celsius.
pub const MAX_MAX_TEMPERATURE: f64 = 35.0;

/// Physical plausibility bounds for device-reported water temperatures.
const MIN_REPORTED_TEMPERATURE: f64 = 0.0;
const MAX_REPORTED_TEMPERATURE: f64 = 100.0;

/// Power state of the recirculation pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    On,
    Off,
}

/// A single temperature measurement reported by the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// Water temperature in degrees Celsius.
    pub value: f64,
    /// When the device took the measurement.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl TemperatureReading {
    /// Whether the reading is physically plausible ([0, 100] °C).
    ///
    /// Devices occasionally report sentinel values (e.g. -127) when the
    /// probe is disconnected; such readings are rejected upstream.
    pub fn is_plausible(&self) -> bool {
        (MIN_REPORTED_TEMPERATURE..=MAX_REPORTED_TEMPERATURE).contains(&self.value)
    }
}

/// Full device status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecirculatorStatus {
    pub device_id: String,
    pub power_state: PowerState,
    pub max_temperature: f64,
    pub last_temperature: Option<TemperatureReading>,
    /// Whether the device has reported within its expected interval.
    pub online: bool,
}

/// Validate a requested recirculation target temperature.
///
/// The accepted range is [20, 35] °C; anything outside is rejected
/// before a device call is attempted.
pub fn validate_max_temperature(value: f64) -> Result<(), String> {
    if !(MIN_MAX_TEMPERATURE..=MAX_MAX_TEMPERATURE).contains(&value) {
        return Err(format!(
            "max_temperature must be between {MIN_MAX_TEMPERATURE} and {MAX_MAX_TEMPERATURE} \
             degrees Celsius, got {value}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_temperature_bounds_are_inclusive() {
        assert!(validate_max_temperature(20.0).is_ok());
        assert!(validate_max_temperature(35.0).is_ok());
        assert!(validate_max_temperature(27.5).is_ok());
    }

    #[test]
    fn out_of_range_max_temperature_is_rejected() {
        assert!(validate_max_temperature(19.9).is_err());
        assert!(validate_max_temperature(40.0).is_err());
        assert!(validate_max_temperature(-5.0).is_err());
    }

    #[test]
    fn disconnected_probe_reading_is_implausible() {
        let reading = TemperatureReading {
            value: -127.0,
            timestamp: chrono::Utc::now(),
        };
        assert!(!reading.is_plausible());
    }

    #[test]
    fn normal_reading_is_plausible() {
        let reading = TemperatureReading {
            value: 42.0,
            timestamp: chrono::Utc::now(),
        };
        assert!(reading.is_plausible());
    }

    #[test]
    fn power_state_uses_uppercase_wire_names() {
        assert_eq!(serde_json::to_string(&PowerState::On).unwrap(), "\"ON\"");
        assert_eq!(serde_json::to_string(&PowerState::Off).unwrap(), "\"OFF\"");
    }
}
