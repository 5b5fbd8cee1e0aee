//! Shared library for `schemagram`
//! Contains the schema model, row store, diagram generators, and
//! configuration used by the CLI.

pub mod core;

pub use self::core::{config, diagram, schema, social, store};
