//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `MinifyError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `MissingMandatoryField`: Campo obbligatorio assente nei settings
//! - `UnknownCompressor`: Identificatore compressore non registrato
//! - `Pattern`: Wildcard malformata
//! - `Execution`: Il tool esterno ha riportato un fallimento
//! - `MissingDependency`: Binario o JAR esterno mancante (java, esbuild)
//! - `Batch`: Aggregato di fallimenti in modalità batch best-effort
//! - `Cancelled`: Esecuzione interrotta da segnale di stop
//!
//! ## Propagazione:
//! - Errori di validazione falliscono subito, prima di qualsiasi I/O
//! - Errori dei singoli task batch vengono raccolti, mai ritentati

/// Custom error types for settings resolution and compressor dispatch
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is mandatory")]
    MissingMandatoryField(&'static str),

    #[error("Unknown compressor: {0}")]
    UnknownCompressor(String),

    #[error("Invalid wildcard pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Compressor error: {0}")]
    Execution(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("{failed} of {total} compression tasks failed: {detail}")]
    Batch {
        failed: usize,
        total: usize,
        detail: String,
    },

    #[error("Run cancelled before completion")]
    Cancelled,
}

impl MinifyError {
    /// True when the error originates from the underlying tool rather
    /// than from settings or the filesystem.
    pub fn is_execution_error(&self) -> bool {
        matches!(self, MinifyError::Execution(_) | MinifyError::Batch { .. })
    }
}
