//! Report templates layered on the evalplot script builder.

mod layers;

pub mod detection;
pub mod landmarking;
pub mod metadata;
pub mod recognition;
pub mod variant;

pub use detection::{any_single_point, DetectionReport, DETECTION_RELATIONS};
pub use landmarking::{LandmarkingReport, LANDMARK_RELATIONS};
pub use metadata::{MetadataReport, METADATA_DESTINATION};
pub use recognition::RecognitionReport;
pub use variant::{generate, plot, ReportVariant};
