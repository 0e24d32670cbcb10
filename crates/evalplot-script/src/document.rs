use std::path::{Path, PathBuf};

use evalplot_core::{sibling_path, DEFAULT_SUFFIX, SCRIPT_EXTENSION};

use crate::ir::{Arg, Expr, Statement};
use crate::render;

/// Canvas size passed to every device other than the default PDF.
pub const RASTER_SIZE: f64 = 800.0;

/// R graphics device opened for an output suffix, matched case-insensitively.
pub fn device_function(suffix: &str) -> String {
    let suffix = suffix.to_ascii_lowercase();
    match suffix.as_str() {
        "jpg" | "jpeg" => "jpeg".to_string(),
        "tif" | "tiff" => "tiff".to_string(),
        _ => suffix,
    }
}

/// Append-only program bound to one output destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptDocument {
    basename: PathBuf,
    suffix: String,
    statements: Vec<Statement>,
}

impl ScriptDocument {
    pub fn new(basename: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            suffix: suffix.into(),
            statements: Vec::new(),
        }
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn extend<I: IntoIterator<Item = Statement>>(&mut self, statements: I) {
        self.statements.extend(statements);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn basename(&self) -> &Path {
        &self.basename
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_default_format(&self) -> bool {
        self.suffix.eq_ignore_ascii_case(DEFAULT_SUFFIX)
    }

    pub fn script_path(&self) -> PathBuf {
        sibling_path(&self.basename, SCRIPT_EXTENSION)
    }

    pub fn artifact_path(&self) -> PathBuf {
        sibling_path(&self.basename, &self.suffix)
    }

    /// `pdf("<base>.pdf")`, or the matching device with a fixed canvas.
    pub fn device(&self) -> Statement {
        let mut args = vec![Arg::pos(Expr::string(
            self.artifact_path().display().to_string(),
        ))];
        if !self.is_default_format() {
            args.push(Arg::named("width", Expr::num(RASTER_SIZE)));
            args.push(Arg::named("height", Expr::num(RASTER_SIZE)));
        }
        Statement::eval(Expr::call(device_function(&self.suffix), args))
    }

    /// Renders the program text.
    pub fn render(&self) -> String {
        render::program(&self.statements)
    }
}
