//! Core module for `schemagram`

pub mod config;
pub mod diagram;
pub mod schema;
pub mod social;
pub mod store;

/// Returns the current version of the `schemagram` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
