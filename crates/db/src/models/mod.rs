//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod consumption;
pub mod event;
pub mod household;
pub mod household_user;
pub mod invitation;
pub mod session;
pub mod tag;
pub mod user;
