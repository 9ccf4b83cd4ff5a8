//! Water-sensor identifier validation.
//!
//! Sensors are provisioned externally and referenced by households via a
//! MAC-like identifier: exactly 12 hexadecimal digits, no separators.

use std::sync::OnceLock;

use regex::Regex;

fn sensor_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[0-9a-fA-F]{12}$").expect("sensor id regex must compile"))
}

/// Check whether a string is a well-formed sensor identifier.
pub fn is_valid_sensor_id(sensor_id: &str) -> bool {
    sensor_id_regex().is_match(sensor_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_twelve_hex_digits() {
        assert!(is_valid_sensor_id("a1b2c3d4e5f6"));
        assert!(is_valid_sensor_id("A1B2C3D4E5F6"));
        assert!(is_valid_sensor_id("000000000000"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_sensor_id("a1b2c3d4e5f"));
        assert!(!is_valid_sensor_id("a1b2c3d4e5f67"));
        assert!(!is_valid_sensor_id(""));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(!is_valid_sensor_id("a1b2c3d4e5fg"));
        assert!(!is_valid_sensor_id("a1:b2:c3:d4:"));
        assert!(!is_valid_sensor_id("a1b2c3 4e5f6"));
    }
}
