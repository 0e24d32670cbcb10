//! Per-chart option defaults merged with caller `key=value` overrides.

use std::collections::BTreeMap;
use std::fmt;

use evalplot_core::errors::{ErrorInfo, PlotError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Option names understood by chart declarations.
pub const KNOWN_OPTIONS: [&str; 14] = [
    "title",
    "xTitle",
    "yTitle",
    "xLog",
    "yLog",
    "xLabels",
    "xBreaks",
    "yLabels",
    "yBreaks",
    "xLimits",
    "yLimits",
    "size",
    "textSize",
    "legendPosition",
];

/// Chart kinds with their own option defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Roc,
    Det,
    Iet,
    Cmc,
    DetectionRoc,
    DetectionPr,
}

impl ChartKind {
    /// Configuration key holding this chart's overrides.
    pub fn config_key(self) -> &'static str {
        match self {
            ChartKind::Roc | ChartKind::DetectionRoc => "rocOptions",
            ChartKind::Det => "detOptions",
            ChartKind::Iet => "ietOptions",
            ChartKind::Cmc => "cmcOptions",
            ChartKind::DetectionPr => "prOptions",
        }
    }

    /// Built-in defaults before any override is applied.
    pub fn defaults(self) -> ChartOptions {
        let (x_title, y_title, x_log, y_log) = match self {
            ChartKind::Roc => ("False Accept Rate", "True Accept Rate", true, false),
            ChartKind::Det | ChartKind::DetectionPr => {
                ("False Accept Rate", "False Reject Rate", true, true)
            }
            ChartKind::Iet => (
                "False Positive Identification Rate (FPIR)",
                "False Negative Identification Rate (FNIR)",
                true,
                true,
            ),
            ChartKind::Cmc => ("Rank", "Retrieval Rate", true, false),
            ChartKind::DetectionRoc => ("False Accepts Per Image", "True Accept Rate", true, false),
        };
        let mut options = ChartOptions::default();
        options.set("xTitle", OptionValue::Text(x_title.into()));
        options.set("yTitle", OptionValue::Text(y_title.into()));
        options.set("xLog", OptionValue::Bool(x_log));
        options.set("yLog", OptionValue::Bool(y_log));
        if self == ChartKind::Cmc {
            options.set("size", OptionValue::Number(1.0));
            options.set("xLabels", OptionValue::Text("c(1,5,10,50,100)".into()));
            options.set("xBreaks", OptionValue::Text("c(1,5,10,50,100)".into()));
        }
        options
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Pair(f64, f64),
    Text(String),
}

impl OptionValue {
    /// Infers the type of a raw override value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "true" => return OptionValue::Bool(true),
            "false" => return OptionValue::Bool(false),
            _ => {}
        }
        if let Some(value) = parse_finite(raw) {
            return OptionValue::Number(value);
        }
        if let Some(inner) = raw.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
            if let Some((a, b)) = inner.split_once(',') {
                if let (Some(a), Some(b)) = (parse_finite(a), parse_finite(b)) {
                    return OptionValue::Pair(a, b);
                }
            }
        }
        OptionValue::Text(raw.to_string())
    }

    pub fn as_bool(&self) -> bool {
        match self {
            OptionValue::Bool(flag) => *flag,
            OptionValue::Number(value) => *value != 0.0,
            OptionValue::Text(text) => text.eq_ignore_ascii_case("true") || text == "1",
            OptionValue::Pair(..) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(value) => Some(*value),
            OptionValue::Text(text) => parse_finite(text),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            OptionValue::Pair(a, b) => Some((*a, *b)),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(flag) => write!(f, "{flag}"),
            OptionValue::Number(value) => f.write_str(&crate::render::number(*value)),
            OptionValue::Pair(a, b) => write!(
                f,
                "({}, {})",
                crate::render::number(*a),
                crate::render::number(*b)
            ),
            OptionValue::Text(text) => f.write_str(text),
        }
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Resolved options for one chart declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    values: BTreeMap<String, OptionValue>,
}

impl ChartOptions {
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    /// Returns a copy with one entry replaced.
    pub fn with(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Textual form of an option, if set.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }

    /// Boolean flag; unset reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::as_bool)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(OptionValue::as_number)
    }

    pub fn pair(&self, name: &str) -> Option<(f64, f64)> {
        self.get(name).and_then(OptionValue::as_pair)
    }

    /// Applies overrides in order; later entries win.
    pub fn apply<S: AsRef<str>>(&mut self, key: &str, overrides: &[S]) -> Result<(), PlotError> {
        for entry in overrides {
            let entry = entry.as_ref();
            let words = split_top_level(entry);
            let name = words[0].trim();
            let value = match words.as_slice() {
                [_] => OptionValue::Bool(true),
                [_, value] => OptionValue::parse(value),
                _ => {
                    return Err(PlotError::Options(
                        ErrorInfo::new("option-arity", "expected `name` or `name=value`")
                            .with_context("option", entry)
                            .with_context("chart", key),
                    ))
                }
            };
            if name.is_empty() {
                return Err(PlotError::Options(
                    ErrorInfo::new("option-name", "override has no option name")
                        .with_context("option", entry)
                        .with_context("chart", key),
                ));
            }
            if !KNOWN_OPTIONS.contains(&name) {
                warn!(option = name, chart = key, "unrecognised chart option kept");
            }
            self.set(name, value);
        }
        Ok(())
    }
}

/// Resolves the options of one chart kind against caller overrides.
pub fn resolve<S: AsRef<str>>(kind: ChartKind, overrides: &[S]) -> Result<ChartOptions, PlotError> {
    let mut options = kind.defaults();
    options.apply(kind.config_key(), overrides)?;
    Ok(options)
}

/// Splits on `=` outside parentheses, brackets, braces and quotes.
fn split_top_level(entry: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, ch) in entry.char_indices() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => {
                words.push(&entry[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    words.push(&entry[start..]);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_equals_does_not_split() {
        assert_eq!(split_top_level("xLabels=c(a=1)"), vec!["xLabels", "c(a=1)"]);
        assert_eq!(split_top_level("title='a=b'"), vec!["title", "'a=b'"]);
        assert_eq!(split_top_level("a=b=c").len(), 3);
        assert_eq!(split_top_level("flag"), vec!["flag"]);
    }

    #[test]
    fn values_are_typed() {
        assert_eq!(OptionValue::parse("true"), OptionValue::Bool(true));
        assert_eq!(OptionValue::parse("12"), OptionValue::Number(12.0));
        assert_eq!(OptionValue::parse("(0.5, 1)"), OptionValue::Pair(0.5, 1.0));
        assert_eq!(OptionValue::parse("inf"), OptionValue::Text("inf".into()));
        assert_eq!(
            OptionValue::parse("c(1,5)"),
            OptionValue::Text("c(1,5)".into())
        );
    }
}
