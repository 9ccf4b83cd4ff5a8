//! Domain layer for the Waterline household water-monitoring platform.
//!
//! Pure types and logic with no I/O: the error taxonomy, fixture
//! categories, household roles, sensor-id validation, and the
//! consumption aggregation math (time bucketing, baseline deviation,
//! per-person normalization).

pub mod category;
pub mod consumption;
pub mod email;
pub mod error;
pub mod roles;
pub mod sensor;
pub mod types;
