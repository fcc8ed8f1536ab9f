//! # Settings Module
//!
//! Questo modulo gestisce la configurazione utente accettata dall'entry point.
//!
//! ## Responsabilità:
//! - Definisce la struct `Settings` con tutti i parametri di compressione
//! - Fornisce valori di default identici al contratto storico
//!   (`sync: false`, `options: {}`, `buffer: 1024000`)
//! - Supporta deserializzazione da JSON in camelCase (`publicFolder`,
//!   `replaceInPlace`) per compatibilità con configurazioni esistenti
//! - Definisce `InputSpec` per input singolo o lista ordinata di path/wildcard
//!
//! ## Parametri di configurazione:
//! - `compressor`: Identificatore del compressore (obbligatorio)
//! - `input`: Path o wildcard, singolo o lista (modalità file)
//! - `content`: Payload in-memory, mutuamente esclusivo con input/output
//! - `output`: Template di output, placeholder `$1` opzionale
//! - `public_folder`: Prefisso applicato a input/output relativi
//! - `replace_in_place`: Output scritto accanto al rispettivo input
//! - `sync`: Esecuzione batch sequenziale invece che concorrente
//! - `options`: Opzioni specifiche del compressore, opache per il core
//! - `buffer`: Hint in byte per la cattura degli stream del subprocess
//!
//! ## Lifecycle:
//! Un valore `Settings` viene costruito una volta dall'input utente, risolto
//! in un piano eseguibile e scartato a fine run. Nessuna persistenza.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default byte-size hint for subprocess stream capture.
pub const DEFAULT_BUFFER: usize = 1000 * 1024;

/// Input specification: a single path-or-wildcard string or an ordered list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum InputSpec {
    Single(String),
    Many(Vec<String>),
}

impl InputSpec {
    /// View the specification as an ordered slice of entries.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            InputSpec::Single(s) => vec![s.as_str()],
            InputSpec::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            InputSpec::Single(s) => s.is_empty(),
            InputSpec::Many(items) => items.is_empty(),
        }
    }
}

impl From<&str> for InputSpec {
    fn from(value: &str) -> Self {
        InputSpec::Single(value.to_string())
    }
}

impl From<Vec<String>> for InputSpec {
    fn from(value: Vec<String>) -> Self {
        InputSpec::Many(value)
    }
}

/// User-supplied configuration for one compression run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Identifier of the compressor adapter to dispatch to
    pub compressor: String,
    /// Input path(s), possibly containing `*` wildcards (file mode)
    pub input: Option<InputSpec>,
    /// In-memory payload (in-memory mode, mutually exclusive with input/output)
    pub content: Option<String>,
    /// Output path template, may contain one `$1` placeholder
    pub output: Option<String>,
    /// Path prefix applied to relative inputs and derived outputs
    pub public_folder: Option<String>,
    /// Write each output next to its input, ignoring the public folder
    pub replace_in_place: bool,
    /// Run batch items sequentially instead of concurrently
    pub sync: bool,
    /// Compressor-specific options, forwarded through the adapter allow-list
    pub options: HashMap<String, serde_json::Value>,
    /// Byte-size hint for subprocess I/O buffering
    pub buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compressor: String::new(),
            input: None,
            content: None,
            output: None,
            public_folder: None,
            replace_in_place: false,
            sync: false,
            options: HashMap::new(),
            buffer: DEFAULT_BUFFER,
        }
    }
}

impl Settings {
    /// Convenience constructor for the common file-mode case.
    pub fn for_files(
        compressor: impl Into<String>,
        input: impl Into<InputSpec>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            compressor: compressor.into(),
            input: Some(input.into()),
            output: Some(output.into()),
            ..Default::default()
        }
    }

    /// Convenience constructor for the in-memory case.
    pub fn for_content(compressor: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            compressor: compressor.into(),
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(!settings.sync);
        assert!(!settings.replace_in_place);
        assert!(settings.options.is_empty());
        assert_eq!(settings.buffer, 1_024_000);
        assert!(settings.input.is_none());
        assert!(settings.content.is_none());
    }

    #[test]
    fn test_settings_camel_case_json() {
        let json = r#"{
            "compressor": "yui",
            "input": ["a.js", "lib/*.js"],
            "output": "dist/$1.min.js",
            "publicFolder": "public/",
            "replaceInPlace": true,
            "options": {"type": "js"}
        }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.compressor, "yui");
        assert_eq!(
            settings.input,
            Some(InputSpec::Many(vec!["a.js".into(), "lib/*.js".into()]))
        );
        assert_eq!(settings.public_folder.as_deref(), Some("public/"));
        assert!(settings.replace_in_place);
        assert_eq!(settings.buffer, 1_024_000);
        assert_eq!(settings.options["type"], "js");
    }

    #[test]
    fn test_input_spec_single_from_json_string() {
        let settings: Settings =
            serde_json::from_str(r#"{"compressor": "oxc", "input": "app.js"}"#).unwrap();
        assert_eq!(settings.input, Some(InputSpec::Single("app.js".into())));
        assert_eq!(settings.input.unwrap().entries(), vec!["app.js"]);
    }
}
