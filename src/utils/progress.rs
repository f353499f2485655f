//! Progress reporting for long catalog runs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over a known number of artists; a no-op when disabled
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(total: usize, enabled: bool) -> Self {
        if !enabled || total == 0 {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .map(|style| style.progress_chars("##-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        Self { bar: Some(bar) }
    }

    /// Advance by one artist, showing its name
    pub fn tick(&self, artist: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(artist.to_string());
            bar.inc(1);
        }
    }

    pub fn finish(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message);
        }
    }
}
