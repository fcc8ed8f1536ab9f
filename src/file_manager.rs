//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file del core.
//!
//! ## Responsabilità:
//! - Lettura e concatenazione ordinata dei file di input
//! - Scrittura output con creazione on-demand delle directory parent
//! - Rimozione best-effort di artefatti temporanei
//! - Utilità per formattazione dimensioni e calcolo riduzione
//!
//! ## Sicurezza operazioni:
//! - Le scritture sono operazioni scoped: open, write completo, close
//! - I fallimenti di scrittura vengono sempre propagati, mai ritentati

use crate::error::MinifyError;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Manages file operations for inputs, outputs and scratch artifacts
pub struct FileManager;

impl FileManager {
    /// Read one input file to a string.
    pub async fn read_file(path: &Path) -> Result<String, MinifyError> {
        Ok(fs::read_to_string(path).await?)
    }

    /// Read and concatenate input files in order, newline separated.
    pub async fn concat_files(paths: &[impl AsRef<Path>]) -> Result<String, MinifyError> {
        let mut combined = String::new();
        for path in paths {
            let content = Self::read_file(path.as_ref()).await?;
            combined.push_str(&content);
            if !content.ends_with('\n') {
                combined.push('\n');
            }
        }
        Ok(combined)
    }

    /// Write an output file, creating parent directories if absent.
    pub async fn write_file(path: &Path, content: &str) -> Result<(), MinifyError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// Remove a file, ignoring a missing target.
    pub async fn delete_file(path: &Path) -> Result<(), MinifyError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}
