//! # Path Resolution Module
//!
//! Centralizza l'espansione delle wildcard negli input e l'applicazione del
//! prefisso public folder. Evita duplicazione tra resolver e planner.
//!
//! ## Responsabilità:
//! - Espande pattern `*` in liste concrete di file esistenti (crate `glob`)
//! - Mantiene l'ordine: letterali nell'ordine originale, match in coda
//! - Nessuna entry con wildcard sopravvive alla risoluzione
//! - Prefisso public folder idempotente (mai duplicato)
//!
//! ## Edge case:
//! - Wildcard senza match: risultato vuoto, warning, mai errore
//! - Path non leggibili durante l'espansione: scartati

use crate::error::MinifyError;
use crate::settings::InputSpec;
use std::path::Path;
use tracing::{debug, warn};

/// True when the entry still contains a wildcard marker.
pub fn has_wildcard(entry: &str) -> bool {
    entry.contains('*')
}

/// Resolve an input specification into concrete path strings.
///
/// Literal entries pass through unchanged and keep their original relative
/// order; every wildcard entry is replaced by its filesystem matches, which
/// are appended after the literals. A wildcard matching nothing contributes
/// nothing.
pub fn resolve_input(
    input: &InputSpec,
    public_folder: Option<&str>,
) -> Result<Vec<String>, MinifyError> {
    match input {
        InputSpec::Single(entry) => {
            if has_wildcard(entry) {
                expand_wildcard(entry, public_folder)
            } else {
                Ok(vec![entry.clone()])
            }
        }
        InputSpec::Many(entries) => {
            // Build a new filtered vector instead of mutating while iterating.
            let mut resolved: Vec<String> = entries
                .iter()
                .filter(|entry| !has_wildcard(entry))
                .cloned()
                .collect();

            for entry in entries.iter().filter(|entry| has_wildcard(entry)) {
                resolved.extend(expand_wildcard(entry, public_folder)?);
            }

            Ok(resolved)
        }
    }
}

/// Expand a single wildcard pattern against the filesystem.
///
/// The public folder, when given, prefixes the pattern, so the returned
/// matches already carry it. `glob` yields paths in alphabetical order,
/// which keeps resolution deterministic for a given filesystem state.
fn expand_wildcard(
    pattern: &str,
    public_folder: Option<&str>,
) -> Result<Vec<String>, MinifyError> {
    let full_pattern = match public_folder {
        Some(folder) => format!("{}{}", folder, pattern),
        None => pattern.to_string(),
    };

    let matches: Vec<String> = glob::glob(&full_pattern)?
        .filter_map(|entry| entry.ok())
        .map(|path| path.to_string_lossy().into_owned())
        .collect();

    if matches.is_empty() {
        warn!("Wildcard matched no files: {}", full_pattern);
    } else {
        debug!("Wildcard {} resolved to {} files", full_pattern, matches.len());
    }

    Ok(matches)
}

/// Prefix a path with the public folder unless it already carries it.
pub fn apply_public_folder(path: &str, public_folder: &str) -> String {
    let folder = Path::new(public_folder);
    let candidate = Path::new(path);

    if candidate.starts_with(folder) {
        return path.to_string();
    }

    folder.join(candidate).to_string_lossy().into_owned()
}
