//! Request middleware: authentication extraction and household
//! membership authorization.

pub mod auth;
pub mod membership;
