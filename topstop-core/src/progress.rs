//! Progress reporting hooks.
//!
//! The pipeline reports through a [`Progress`] observer it is handed at
//! construction. Reports never feed back into processing, so any
//! implementation (including [`SilentProgress`]) yields the same output
//! files.

/// Observer for run and per-file progress.
///
/// All methods default to doing nothing. Implementations are shared between
/// worker threads when files are processed in parallel.
pub trait Progress: Send + Sync {
    /// Called once before the config is loaded.
    fn start(&self) {}

    /// A new file (or the summary step) begins.
    fn report_file(&self, _name: &str) {}

    /// Progress within the current file, from 0 to 100.
    fn report_percentage(&self, _percent: f64) {}

    /// Called once after the run summary is written.
    fn end(&self) {}
}

/// Progress observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {}

impl<P: Progress + ?Sized> Progress for &P {
    fn start(&self) {
        (**self).start();
    }

    fn report_file(&self, name: &str) {
        (**self).report_file(name);
    }

    fn report_percentage(&self, percent: f64) {
        (**self).report_percentage(percent);
    }

    fn end(&self) {
        (**self).end();
    }
}

/// Forwards per-file reports only, for parallel runs where percentages of
/// concurrently processed files would interleave.
#[derive(Debug, Clone, Copy)]
pub struct FileReportsOnly<P>(pub P);

impl<P: Progress> Progress for FileReportsOnly<P> {
    fn start(&self) {
        self.0.start();
    }

    fn report_file(&self, name: &str) {
        self.0.report_file(name);
    }

    fn end(&self) {
        self.0.end();
    }
}
