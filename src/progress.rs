//! # Progress Tracking Module
//!
//! Questo modulo gestisce il feedback visuale durante il run.
//!
//! ## Responsabilità:
//! - Progress bar con `indicatif` per feedback real-time
//! - Un tick per ogni file completato, con messaggio di stato
//!
//! La barra disegna su stderr, quindi non si mescola con il report tabellare
//! scritto su stdout.
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:12] [==================>---------------------] 42/96 (43%) ✅ photo.jpg
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a shrink run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
