//! Seals a document, writes `<base>.R`, runs it and optionally shows the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use evalplot_core::errors::{ErrorInfo, PlotError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::document::ScriptDocument;
use crate::ir::{Expr, Statement};

/// Stray PDF the default device leaves behind when another device is used.
pub const DEFAULT_DEVICE_FILE: &str = "Rplots.pdf";

/// Executes a generated program.
pub trait ScriptRuntime {
    /// Runs the script to completion; `Ok(false)` means it ran and failed.
    fn run(&self, script: &Path) -> Result<bool, PlotError>;
}

/// Opens a rendered artifact for the user.
pub trait ArtifactViewer {
    fn show(&self, artifact: &Path) -> Result<(), PlotError>;
}

/// Runs scripts through an `Rscript` interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RscriptRuntime {
    pub program: PathBuf,
}

impl Default for RscriptRuntime {
    fn default() -> Self {
        Self {
            program: PathBuf::from("Rscript"),
        }
    }
}

impl RscriptRuntime {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ScriptRuntime for RscriptRuntime {
    fn run(&self, script: &Path) -> Result<bool, PlotError> {
        debug!(program = %self.program.display(), script = %script.display(), "invoking runtime");
        let status = Command::new(&self.program)
            .arg(script)
            .status()
            .map_err(|err| {
                PlotError::Runtime(
                    ErrorInfo::new("runtime-spawn", "failed to launch the R interpreter")
                        .with_context("program", self.program.display().to_string())
                        .with_context("script", script.display().to_string())
                        .with_hint(err.to_string()),
                )
            })?;
        Ok(status.success())
    }
}

/// Opens artifacts with the platform's default application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemViewer;

impl ArtifactViewer for SystemViewer {
    fn show(&self, artifact: &Path) -> Result<(), PlotError> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else {
            Command::new("xdg-open")
        };
        command.arg(artifact).spawn().map_err(|err| {
            PlotError::Runtime(
                ErrorInfo::new("viewer-spawn", "failed to open the rendered artifact")
                    .with_context("artifact", artifact.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Ok(())
    }
}

/// Paths produced by a finalized report and whether the runtime succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotOutcome {
    pub script: PathBuf,
    pub artifact: PathBuf,
    pub success: bool,
}

/// A document closed against further statements.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedScript {
    document: ScriptDocument,
}

/// Appends the device shutdown and default-device cleanup.
pub fn seal(mut document: ScriptDocument) -> SealedScript {
    document.push(Statement::eval(Expr::apply("dev.off", vec![])));
    if !document.is_default_format() {
        document.push(Statement::eval(Expr::apply(
            "unlink",
            vec![Expr::string(DEFAULT_DEVICE_FILE)],
        )));
    }
    SealedScript { document }
}

impl SealedScript {
    pub fn document(&self) -> &ScriptDocument {
        &self.document
    }

    pub fn render(&self) -> String {
        self.document.render()
    }

    /// Writes `<base>.R`.
    pub fn write(&self) -> Result<PathBuf, PlotError> {
        let path = self.document.script_path();
        fs::write(&path, self.render()).map_err(|err| {
            PlotError::Script(
                ErrorInfo::new("script-write", "failed to write the generated script")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        debug!(path = %path.display(), "script written");
        Ok(path)
    }

    /// Writes the script without running it.
    pub fn dry_run(&self) -> Result<PlotOutcome, PlotError> {
        let script = self.write()?;
        Ok(PlotOutcome {
            script,
            artifact: self.document.artifact_path(),
            success: true,
        })
    }

    /// Writes, runs and, on success, optionally shows the artifact.
    pub fn execute(
        &self,
        runtime: &dyn ScriptRuntime,
        viewer: &dyn ArtifactViewer,
        show: bool,
    ) -> Result<PlotOutcome, PlotError> {
        let script = self.write()?;
        let artifact = self.document.artifact_path();
        let success = runtime.run(&script)?;
        if success {
            info!(artifact = %artifact.display(), "report rendered");
            if show {
                if let Err(err) = viewer.show(&artifact) {
                    warn!(error = %err, "could not open rendered artifact");
                }
            }
        } else {
            warn!(script = %script.display(), "runtime reported failure, script kept");
        }
        Ok(PlotOutcome {
            script,
            artifact,
            success,
        })
    }
}
