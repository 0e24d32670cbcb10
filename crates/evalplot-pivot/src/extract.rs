use std::path::{Component, Path};

/// Delimiter separating pivot labels inside directory and file names.
pub const PIVOT_DELIMITER: char = '_';

/// Which part of an input path carries the pivot tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotSource {
    /// Name of the enclosing directory; yields the pivot headers.
    Directory,
    /// File name with its last extension stripped; yields the labels.
    BaseName,
}

/// Splits the selected part of `path` into ordered pivot tokens.
///
/// An empty selection produces a single empty token.
pub fn pivot_labels(path: &Path, source: PivotSource) -> Vec<String> {
    let selected = match source {
        PivotSource::Directory => directory_name(path),
        PivotSource::BaseName => base_name(path),
    };
    selected
        .split(PIVOT_DELIMITER)
        .map(str::to_string)
        .collect()
}

/// File name of `path` without its last extension (`alg1_0.csv` -> `alg1_0`).
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Header used when the containing directory has no name of its own
/// (`a.csv`, `./a.csv`, `../a.csv`).
pub const CURRENT_DIRECTORY: &str = ".";

/// Name of the directory directly containing `path`.
pub fn directory_name(path: &Path) -> String {
    match path.parent().and_then(|parent| parent.components().next_back()) {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        _ => CURRENT_DIRECTORY.to_string(),
    }
}
