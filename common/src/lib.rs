//! Platform-independent core of the Reeble client.
//!
//! Everything here compiles for both the browser (`wasm32`) and the host, so the
//! form-filling logic can be unit tested without a browser. The frontend crate
//! supplies the concrete HTTP transport and storage backends.

pub mod api;
pub mod config;
pub mod error;
pub mod fields;
pub mod listing;
pub mod model;
pub mod requests;
pub mod routing;
pub mod session;
pub mod storage;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;
