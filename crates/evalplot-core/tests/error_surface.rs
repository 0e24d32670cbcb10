use evalplot_core::errors::{ErrorInfo, PlotError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "results/alg1_0.csv")
        .with_context("reason", "example")
}

#[test]
fn input_error_surface() {
    let err = PlotError::Input(sample_info("pivot-empty-inputs", "no input files"));
    assert_eq!(err.info().code, "pivot-empty-inputs");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn options_error_surface() {
    let err = PlotError::Options(sample_info("option-arity", "bad override"));
    assert_eq!(err.info().code, "option-arity");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn script_error_surface() {
    let err = PlotError::Script(sample_info("script-write", "read-only directory"));
    assert_eq!(err.info().code, "script-write");
}

#[test]
fn display_includes_context_and_hint() {
    let err = PlotError::Config(
        ErrorInfo::new("config-confidence", "confidence must lie within [0, 100]")
            .with_context("confidence", "120")
            .with_hint("use a percentage"),
    );
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "config error: confidence must lie within [0, 100] [config-confidence] \
         (confidence=120); hint: use a percentage"
    );
    assert_eq!(err.code(), "config-confidence");
}

#[test]
fn errors_round_trip_json() {
    let err = PlotError::Runtime(sample_info("runtime-spawn", "Rscript missing"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Runtime\""));
    let decoded: PlotError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
