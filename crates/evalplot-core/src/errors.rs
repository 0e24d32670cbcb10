//! Fatal errors raised while classifying inputs and synthesizing reports.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic carried by every [`PlotError`].
///
/// `code` is stable (`pivot-empty-inputs`, `option-arity`, `script-write`, ...)
/// so callers and the CLI JSON output can match on it. `context` names the
/// offending input path, option key or chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error code.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Offending values keyed by role, e.g. `path` or `option`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to fix the invocation, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Diagnostic with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records an offending value; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Why a report could not be produced.
///
/// Every variant is fatal: report generation stops and the payload names the
/// offending path or option key. Soft degradations (naming-convention fallback,
/// unsupported gallery images) never surface here, and a runtime that exits
/// unsuccessfully is reported through the outcome rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PlotError {
    /// Empty input list or an unreadable result file.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Chart override with an empty name or too many `=` parts.
    #[error("options error: {0}")]
    Options(ErrorInfo),
    /// Confidence outside `[0, 100]`, zero legend columns, unreadable config file.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// The generated program could not be written beside the artifact.
    #[error("script error: {0}")]
    Script(ErrorInfo),
    /// The interpreter or artifact viewer could not be launched.
    #[error("runtime error: {0}")]
    Runtime(ErrorInfo),
    /// Malformed YAML configuration.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// `message [code] (key=value, ...); hint: ...`
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " ({})", pairs.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

impl PlotError {
    /// Diagnostic shared by every family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PlotError::Input(info)
            | PlotError::Options(info)
            | PlotError::Config(info)
            | PlotError::Script(info)
            | PlotError::Runtime(info)
            | PlotError::Serde(info) => info,
        }
    }

    /// Stable code of the diagnostic.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
