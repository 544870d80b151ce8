pub mod dashboards;
pub mod fields;
pub mod helpers;
pub mod login;
pub mod pdf_preview;
pub mod submission;
pub mod upload;
