//! Display models for CLI output
//!
//! Converts library results into CLI-friendly display formats.

pub mod display;

pub use display::{AssetDisplay, ConversionDisplay, DeleteDisplay, DeployDisplay};
