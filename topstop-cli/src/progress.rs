use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use topstop_core::progress::{Progress, SilentProgress};

const BAR_TEMPLATE: &str = "  {msg:<32} [{bar:40.cyan/blue}] {pos:>3}%";

/// One progress bar per input file, on stderr.
pub struct ConsoleProgress {
    current: Mutex<Option<ProgressBar>>,
    style: ProgressStyle,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        Self {
            current: Mutex::new(None),
            style,
        }
    }

    fn replace_bar(&self, next: Option<ProgressBar>) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(bar) = current.take() {
                bar.finish();
            }
            *current = next;
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn report_file(&self, name: &str) {
        let bar = ProgressBar::new(100);
        bar.set_style(self.style.clone());
        bar.set_message(format!("File {name}"));
        self.replace_bar(Some(bar));
    }

    fn report_percentage(&self, percent: f64) {
        if let Ok(current) = self.current.lock() {
            if let Some(bar) = current.as_ref() {
                bar.set_position(percent.clamp(0.0, 100.0) as u64);
            }
        }
    }

    fn end(&self) {
        self.replace_bar(None);
    }
}

/// Progress display selected on the command line.
pub enum Display {
    Interactive(ConsoleProgress),
    Silent(SilentProgress),
}

impl Display {
    pub fn new(interactive: bool) -> Self {
        if interactive {
            Self::Interactive(ConsoleProgress::new())
        } else {
            Self::Silent(SilentProgress)
        }
    }
}

impl Progress for Display {
    fn start(&self) {
        match self {
            Self::Interactive(p) => p.start(),
            Self::Silent(p) => p.start(),
        }
    }

    fn report_file(&self, name: &str) {
        match self {
            Self::Interactive(p) => p.report_file(name),
            Self::Silent(p) => p.report_file(name),
        }
    }

    fn report_percentage(&self, percent: f64) {
        match self {
            Self::Interactive(p) => p.report_percentage(percent),
            Self::Silent(p) => p.report_percentage(percent),
        }
    }

    fn end(&self) {
        match self {
            Self::Interactive(p) => p.end(),
            Self::Silent(p) => p.end(),
        }
    }
}
