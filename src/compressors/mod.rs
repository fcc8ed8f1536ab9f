//! # Compressors Module
//!
//! Contratto polimorfico degli adapter e registry dei compressori:
//! - `command`: esecuzione subprocess condivisa (stream draining, warning)
//! - `yui`: YUI Compressor (JAR, js/css)
//! - `gcc`: Google Closure Compiler (JAR, allow-list completa)
//! - `esbuild`: binario nativo, stdin/stdout
//! - `oxc`: minificazione JavaScript in-process

pub mod command;
pub mod esbuild;
pub mod gcc;
pub mod oxc;
pub mod yui;

use crate::error::MinifyError;
use crate::file_manager::FileManager;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// One adapter invocation: either concrete input files or an in-memory
/// payload, never both.
pub struct CompressorTask<'a> {
    /// Resolved input files; empty in in-memory mode
    pub inputs: &'a [PathBuf],
    /// In-memory payload; populated only in in-memory mode
    pub content: Option<&'a str>,
    /// Compressor-specific options, still unfiltered
    pub options: &'a HashMap<String, Value>,
    /// Byte-size hint for subprocess stream capture
    pub buffer: usize,
}

impl CompressorTask<'_> {
    /// Source text for the invocation: the in-memory payload, or the ordered
    /// concatenation of the input files.
    pub async fn source(&self) -> Result<String, MinifyError> {
        match self.content {
            Some(content) => Ok(content.to_string()),
            None => FileManager::concat_files(self.inputs).await,
        }
    }
}

/// Dispatch contract every pluggable compressor satisfies.
///
/// An adapter receives resolved settings plus optional in-memory content and
/// returns the minified text or an error; how it executes (library call,
/// native process, JVM process) is its own business.
#[async_trait]
pub trait Compressor: Send + Sync + std::fmt::Debug {
    /// Registry identifier
    fn name(&self) -> &'static str;

    /// Option keys forwarded to the underlying tool; everything else is
    /// silently dropped.
    fn accepted_options(&self) -> &'static [&'static str];

    /// Execute one invocation.
    async fn run(&self, task: &CompressorTask<'_>) -> Result<String, MinifyError>;
}

/// Stage source text in a scratch file for tools that only read file input.
///
/// The file carries an invocation-unique name and is removed when the
/// returned handle drops, on success and failure alike.
pub(crate) async fn stage_source(
    source: &str,
    suffix: &str,
) -> Result<tempfile::NamedTempFile, MinifyError> {
    let scratch = tempfile::NamedTempFile::with_suffix(suffix)?;
    tokio::fs::write(scratch.path(), source).await?;
    Ok(scratch)
}

/// Keep only allow-listed option keys. Unrecognized keys never cause an
/// error, they are dropped.
pub fn filter_options(
    options: &HashMap<String, Value>,
    accepted: &[&str],
) -> HashMap<String, Value> {
    options
        .iter()
        .filter(|(key, _)| accepted.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn registry() -> &'static HashMap<&'static str, Box<dyn Compressor>> {
    static REGISTRY: OnceLock<HashMap<&'static str, Box<dyn Compressor>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: HashMap<&'static str, Box<dyn Compressor>> = HashMap::new();
        map.insert("yui", Box::new(yui::Yui::new()));
        map.insert("gcc", Box::new(gcc::ClosureCompiler::new()));
        map.insert("esbuild", Box::new(esbuild::Esbuild::new()));
        map.insert("oxc", Box::new(oxc::Oxc::new()));
        map
    })
}

/// Resolve a compressor identifier to its adapter.
pub fn lookup(name: &str) -> Result<&'static dyn Compressor, MinifyError> {
    registry()
        .get(name)
        .map(|compressor| compressor.as_ref())
        .ok_or_else(|| MinifyError::UnknownCompressor(name.to_string()))
}

/// Registered compressor identifiers, sorted.
pub fn available_compressors() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = registry().keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_known_compressors() {
        for name in ["yui", "gcc", "esbuild", "oxc"] {
            let compressor = lookup(name).unwrap();
            assert_eq!(compressor.name(), name);
        }
    }

    #[test]
    fn test_lookup_unknown_compressor() {
        let err = lookup("terser").unwrap_err();
        assert_eq!(err.to_string(), "Unknown compressor: terser");
    }

    #[test]
    fn test_available_compressors_sorted() {
        assert_eq!(available_compressors(), vec!["esbuild", "gcc", "oxc", "yui"]);
    }

    #[test]
    fn test_filter_options_drops_unknown_keys() {
        let mut options = HashMap::new();
        options.insert("compilationLevel".to_string(), json!("ADVANCED"));
        options.insert("notARealFlag".to_string(), json!(true));

        let filtered = filter_options(&options, &["compilationLevel", "languageIn"]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered["compilationLevel"], "ADVANCED");
    }

    #[tokio::test]
    async fn test_scratch_staging_cleanup_on_drop() {
        let path = {
            let scratch = stage_source("var x = 1;", ".js").await.unwrap();
            assert!(scratch.path().exists());
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_task_source_prefers_content() {
        let options = HashMap::new();
        let task = CompressorTask {
            inputs: &[],
            content: Some("var x = 1;"),
            options: &options,
            buffer: 1024,
        };
        assert_eq!(task.source().await.unwrap(), "var x = 1;");
    }
}
