//! Shared CLI argument types
//!
//! Reusable argument structs that can be flattened into commands using
//! `#[command(flatten)]`.

mod common;
mod connection;
mod global;

pub use common::OutputFormat;
pub use connection::ConnectionArgs;
pub use global::GlobalOptions;
