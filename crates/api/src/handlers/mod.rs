//! HTTP handlers, one module per resource.

pub mod auth;
pub mod categories;
pub mod consumption;
pub mod events;
pub mod households;
pub mod invitations;
pub mod recirculator;
pub mod tags;
pub mod users;
