//! # Asset Minifier Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce l'entry point `minify()` per CLI e consumatori esterni
//!
//! ## Architettura dei moduli:
//! - `settings`: Configurazione utente e valori di default
//! - `error`: Tipi di errore custom per tutte le operazioni
//! - `resolver`: Validazione e risoluzione settings → piano eseguibile
//! - `path_resolver`: Espansione wildcard e prefisso public folder
//! - `output_planner`: Template di output, placeholder `$1`, modalità in-place
//! - `compressors`: Contratto adapter, registry e implementazioni
//! - `dispatcher`: Esecuzione del piano e scrittura output
//! - `file_manager`: Operazioni sui file di input/output
//! - `platform`: Comandi esterni cross-platform (java, esbuild)
//! - `jar_resolver`: Localizzazione dei JAR bundled
//! - `progress`: Spinner e statistiche per la CLI
//!
//! ## Utilizzo:
//! ```no_run
//! use asset_minifier::{minify, MinifiedOutput, Settings};
//!
//! # async fn run() -> Result<(), asset_minifier::MinifyError> {
//! let settings = Settings::for_files("oxc", "public/js/*.js", "dist/$1.min.js");
//! match minify(&settings).await? {
//!     MinifiedOutput::Files(written) => println!("{} file(s) written", written.len()),
//!     MinifiedOutput::Content(code) => println!("{}", code),
//! }
//! # Ok(())
//! # }
//! ```

pub mod compressors;
pub mod dispatcher;
pub mod error;
pub mod file_manager;
pub mod jar_resolver;
pub mod output_planner;
pub mod path_resolver;
pub mod platform;
pub mod progress;
pub mod resolver;
pub mod settings;
pub mod utils;

pub use compressors::{available_compressors, Compressor, CompressorTask};
pub use dispatcher::{Dispatcher, MinifiedOutput};
pub use error::MinifyError;
pub use output_planner::OutputTarget;
pub use resolver::{PlanTask, ResolvedPlan, SettingsResolver};
pub use settings::{InputSpec, Settings};

/// Resolve the settings and execute the plan with the selected compressor.
pub async fn minify(settings: &Settings) -> Result<MinifiedOutput, MinifyError> {
    let plan = SettingsResolver::resolve(settings)?;
    let compressor = compressors::lookup(&plan.compressor)?;
    Dispatcher::new().execute(&plan, compressor).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_minify_rejects_unknown_compressor_before_running() {
        let settings = Settings::for_content("not-a-compressor", "var x = 1;");
        let err = minify(&settings).await.unwrap_err();
        assert!(matches!(err, MinifyError::UnknownCompressor(_)));
    }

    #[tokio::test]
    async fn test_minify_in_memory_with_in_process_compressor() {
        let settings = Settings::for_content("oxc", "var answer = 40 + 2;");
        let output = minify(&settings).await.unwrap();
        match output {
            MinifiedOutput::Content(code) => assert!(!code.is_empty()),
            other => panic!("expected content output, got {:?}", other),
        }
    }
}
