pub mod config;
pub mod error;
pub mod formats;
pub mod samplesheet;
pub mod types;

pub use error::{Error, Result};
pub use types::{MaskRun, Schema};
