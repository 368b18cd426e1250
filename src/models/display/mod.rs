//! Display model implementations for table and JSON output
//!
//! Display models turn library results into rows with CLI column names.

mod asset;
mod common;
mod conversion;
mod sync;

pub use asset::AssetDisplay;
pub use conversion::ConversionDisplay;
pub use sync::{DeleteDisplay, DeployDisplay};
