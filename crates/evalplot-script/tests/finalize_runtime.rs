use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use evalplot_core::PlotError;
use evalplot_script::render::program;
use evalplot_script::{device_function, seal, ArtifactViewer, ScriptDocument, ScriptRuntime};

struct FakeRuntime {
    succeed: bool,
    runs: RefCell<Vec<PathBuf>>,
}

impl FakeRuntime {
    fn new(succeed: bool) -> Self {
        Self {
            succeed,
            runs: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptRuntime for FakeRuntime {
    fn run(&self, script: &Path) -> Result<bool, PlotError> {
        assert!(script.exists(), "script must be on disk before it runs");
        self.runs.borrow_mut().push(script.to_path_buf());
        Ok(self.succeed)
    }
}

#[derive(Default)]
struct RecordingViewer {
    shown: RefCell<Vec<PathBuf>>,
}

impl ArtifactViewer for RecordingViewer {
    fn show(&self, artifact: &Path) -> Result<(), PlotError> {
        self.shown.borrow_mut().push(artifact.to_path_buf());
        Ok(())
    }
}

#[test]
fn raster_output_cleans_default_device_and_shows_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("report");
    let sealed = seal(ScriptDocument::new(&base, "png"));
    let runtime = FakeRuntime::new(true);
    let viewer = RecordingViewer::default();

    let outcome = sealed.execute(&runtime, &viewer, true).expect("execute");
    assert!(outcome.success);
    assert_eq!(outcome.script, dir.path().join("report.R"));
    assert_eq!(outcome.artifact, dir.path().join("report.png"));
    assert_eq!(runtime.runs.borrow().as_slice(), &[outcome.script.clone()]);
    assert_eq!(viewer.shown.borrow().as_slice(), &[outcome.artifact.clone()]);

    let written = fs::read_to_string(&outcome.script).expect("script");
    assert_eq!(written, "dev.off()\nunlink(\"Rplots.pdf\")\n");
}

#[test]
fn pdf_output_only_closes_device() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sealed = seal(ScriptDocument::new(dir.path().join("report"), "pdf"));
    assert_eq!(sealed.render(), "dev.off()\n");
}

#[test]
fn failed_run_keeps_script_and_skips_viewer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sealed = seal(ScriptDocument::new(dir.path().join("report"), "pdf"));
    let viewer = RecordingViewer::default();

    let outcome = sealed
        .execute(&FakeRuntime::new(false), &viewer, true)
        .expect("execute");
    assert!(!outcome.success);
    assert!(outcome.script.exists());
    assert!(viewer.shown.borrow().is_empty());
}

#[test]
fn dry_run_writes_without_running() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sealed = seal(ScriptDocument::new(dir.path().join("report"), "svg"));
    let outcome = sealed.dry_run().expect("dry run");
    assert!(outcome.script.exists());
    assert!(!outcome.artifact.exists());
}

#[test]
fn unwritable_script_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("missing").join("report");
    let sealed = seal(ScriptDocument::new(&base, "pdf"));
    let err = sealed
        .execute(&FakeRuntime::new(true), &RecordingViewer::default(), false)
        .unwrap_err();
    match err {
        PlotError::Script(info) => {
            assert_eq!(info.code, "script-write");
            assert!(info.context["path"].ends_with("report.R"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn upper_case_suffix_opens_lower_case_device() {
    assert_eq!(device_function("PNG"), "png");
    assert_eq!(device_function("JPG"), "jpeg");
    assert_eq!(device_function("Tif"), "tiff");

    let raster = ScriptDocument::new("out/report", "PNG");
    assert_eq!(
        program(&[raster.device()]),
        "png(\"out/report.PNG\", width=800, height=800)\n"
    );

    let pdf = ScriptDocument::new("out/report", "PDF");
    assert!(pdf.is_default_format());
    assert_eq!(program(&[pdf.device()]), "pdf(\"out/report.PDF\")\n");
    assert_eq!(seal(pdf).render(), "dev.off()\n");
}
