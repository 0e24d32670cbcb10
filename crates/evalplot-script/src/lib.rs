//! Chart option resolution, a typed R statement IR and the builders that turn a
//! pivot classification into an executable ggplot2 program.

pub mod chart;
pub mod document;
pub mod engine;
pub mod finalize;
pub mod gallery;
pub mod ir;
pub mod options;
pub mod render;
pub mod scale;

pub use chart::{factor, qplot, CMC_RELATION};
pub use document::{device_function, ScriptDocument};
pub use engine::{legend_groups, summary_se, ScriptBuilder, DATA_RELATION, PLOT_COLUMN};
pub use finalize::{
    seal, ArtifactViewer, PlotOutcome, RscriptRuntime, ScriptRuntime, SealedScript, SystemViewer,
};
pub use gallery::{decode_image, image_libraries, ImageFormat, MatchGallery};
pub use ir::{Arg, BinaryOp, Expr, Param, Statement};
pub use options::{resolve, ChartKind, ChartOptions, OptionValue};
pub use scale::{discrete_scale, Palette, ScaleMode};
