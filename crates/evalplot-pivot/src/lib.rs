//! Pivot inference for evaluation result batches.
//!
//! Result files follow a naming convention: the enclosing directory name lists
//! the dimension headers (`Algorithm_Split`) and each file name lists the
//! matching labels (`alg1_0.csv`). The classifier turns a batch of such paths
//! into the major/minor dimensions that drive colour, line style and facets.

mod classify;
mod extract;

pub use classify::{
    classify, sort_inputs, Classification, ClassifyOptions, LabeledInput, NamingMode,
    PivotDimension, PivotLabelSet, ALGORITHM_HEADER, FALLBACK_HEADER,
};
pub use extract::{
    base_name, directory_name, pivot_labels, PivotSource, CURRENT_DIRECTORY, PIVOT_DELIMITER,
};
