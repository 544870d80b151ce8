//! Wire types exchanged with the backend API.

pub mod dashboard;
pub mod field;
pub mod record_id;
pub mod submission;
pub mod template;
pub mod user;
