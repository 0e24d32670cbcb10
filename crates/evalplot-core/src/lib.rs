#![deny(missing_docs)]
#![doc = "Shared error surface, destination and configuration types for evalplot."]

pub mod config;
pub mod errors;
pub mod provenance;

pub use config::{
    sibling_path, Destination, PlotConfig, DEFAULT_SDK_PATH, DEFAULT_SUFFIX, SCRIPT_EXTENSION,
};
pub use errors::{ErrorInfo, PlotError};
pub use provenance::ProductInfo;
