// src/progress.rs
use colored::Colorize;
use std::io::{self, Write};
use std::time::Instant;

const WIDTH: usize = 30;

/// Single-line progress bar redrawn in place on stderr.
pub struct ProgressBar {
    label: String,
    total: usize,
    enabled: bool,
    last_filled: Option<usize>,
    start: Instant,
}

impl ProgressBar {
    #[must_use]
    pub fn start(label: impl Into<String>, total: usize, enabled: bool) -> Self {
        Self {
            label: label.into(),
            total: total.max(1),
            enabled,
            last_filled: None,
            start: Instant::now(),
        }
    }

    /// Redraws only when the bar actually grows.
    pub fn update(&mut self, current: usize, detail: &str) {
        if !self.enabled {
            return;
        }
        let filled = (current.min(self.total) * WIDTH) / self.total;
        if self.last_filled == Some(filled) && current < self.total {
            return;
        }
        self.last_filled = Some(filled);

        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled));
        let mut err = io::stderr();
        let _ = write!(
            err,
            "\r\x1B[2K   {} [{}] {}/{} {}",
            self.label.cyan(),
            bar,
            current,
            self.total,
            detail.dimmed()
        );
        let _ = err.flush();
    }

    pub fn finish(&self, success: bool) {
        if !self.enabled {
            return;
        }
        let icon = if success { "ok".green().bold() } else { "err".red().bold() };
        let elapsed = format!("({:.2?})", self.start.elapsed());
        eprintln!("\r\x1B[2K   {} {} {}", icon, self.label, elapsed.dimmed());
    }
}
