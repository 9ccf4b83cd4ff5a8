//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must take
//! part in a unit-of-work transaction have `_in_tx` variants accepting
//! `&mut sqlx::Transaction` instead.
//!
//! Error policy: lookups return `Option` / empty `Vec` for "not found",
//! never an error; constraint violations surface as `sqlx::Error` and
//! are classified into domain errors at the API boundary.

pub mod consumption_repo;
pub mod event_repo;
pub mod household_repo;
pub mod household_user_repo;
pub mod invitation_repo;
pub mod session_repo;
pub mod tag_repo;
pub mod user_repo;

pub use consumption_repo::ConsumptionRepo;
pub use event_repo::EventRepo;
pub use household_repo::HouseholdRepo;
pub use household_user_repo::HouseholdUserRepo;
pub use invitation_repo::InvitationRepo;
pub use session_repo::SessionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
