//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il feedback visuale della CLI e le statistiche di
//! compressione.
//!
//! ## Responsabilità:
//! - Spinner `indicatif` durante l'esecuzione dei compressori
//! - Statistiche cumulative (file scritti, byte prima/dopo, riduzione)
//! - Riepilogo finale formattato

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for compression runs
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a spinner for one compression run.
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );

        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message without finishing.
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message.
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Clear the spinner without leaving a message behind.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Statistics tracker for compression results
#[derive(Debug, Default)]
pub struct CompressionStats {
    pub files_written: usize,
    pub total_input_bytes: u64,
    pub total_output_bytes: u64,
}

impl CompressionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_written(&mut self, input_bytes: u64, output_bytes: u64) {
        self.files_written += 1;
        self.total_input_bytes += input_bytes;
        self.total_output_bytes += output_bytes;
    }

    pub fn reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.total_input_bytes, self.total_output_bytes)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Compressed {} file(s): {} -> {} ({:.1}% saved)",
            self.files_written,
            FileManager::format_size(self.total_input_bytes),
            FileManager::format_size(self.total_output_bytes),
            self.reduction_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = CompressionStats::new();
        stats.add_written(1000, 400);
        stats.add_written(1000, 600);

        assert_eq!(stats.files_written, 2);
        assert_eq!(stats.total_input_bytes, 2000);
        assert_eq!(stats.total_output_bytes, 1000);
        assert_eq!(stats.reduction_percent(), 50.0);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut stats = CompressionStats::new();
        stats.add_written(2048, 1024);
        let summary = stats.format_summary();
        assert!(summary.contains("1 file(s)"));
        assert!(summary.contains("50.0% saved"));
    }
}
