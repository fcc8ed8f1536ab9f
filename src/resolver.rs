//! # Settings Resolution Module
//!
//! Questo modulo trasforma i `Settings` utente in un piano eseguibile.
//!
//! ## Responsabilità:
//! - Validazione fail-fast dei campi obbligatori, due profili:
//!   - in-memory: richiede `compressor` e `content`
//!   - file: richiede `compressor`, `input` e `output`
//! - Ordine di risoluzione: merge default → espansione wildcard →
//!   derivazione output dal template → prefisso public folder sugli input
//! - Produce un `ResolvedPlan` immutabile, pronto per il dispatcher
//!
//! ## Garanzie:
//! - Dopo la risoluzione nessuna wildcard sopravvive negli input
//! - Output con placeholder ha la stessa cardinalità degli input risolti
//! - La risoluzione legge il filesystem (glob) ma non scrive mai:
//!   invocazioni ripetute a parità di filesystem danno lo stesso piano
//!
//! ## Edge case:
//! - Campi presenti ma vuoti contano come assenti (parità col contratto
//!   storico)
//! - `content` ha precedenza quando sia content che input sono popolati

use crate::error::MinifyError;
use crate::output_planner::{plan_output, OutputTarget};
use crate::path_resolver::{apply_public_folder, resolve_input};
use crate::settings::Settings;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// The work a resolved plan describes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanTask {
    /// Minify an in-memory string, return the result directly
    InMemory { content: String },
    /// Minify concrete input files into the planned output target
    Files {
        inputs: Vec<PathBuf>,
        output: OutputTarget,
    },
}

/// Fully validated, wildcard-expanded, path-templated settings.
///
/// Read-only value consumed by the dispatcher and discarded after the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlan {
    pub compressor: String,
    pub task: PlanTask,
    pub options: HashMap<String, Value>,
    pub buffer: usize,
    pub sync: bool,
}

/// Resolves user settings into an execution plan.
pub struct SettingsResolver;

impl SettingsResolver {
    /// Resolve settings into a [`ResolvedPlan`].
    ///
    /// Fails with [`MinifyError::MissingMandatoryField`] naming the first
    /// missing required key, before any filesystem work.
    pub fn resolve(settings: &Settings) -> Result<ResolvedPlan, MinifyError> {
        Self::check_mandatories(settings)?;

        if let Some(content) = provided(&settings.content) {
            debug!("Resolved in-memory plan for compressor {}", settings.compressor);
            return Ok(ResolvedPlan {
                compressor: settings.compressor.clone(),
                task: PlanTask::InMemory {
                    content: content.to_string(),
                },
                options: settings.options.clone(),
                buffer: settings.buffer,
                sync: settings.sync,
            });
        }

        let input_spec = settings.input.as_ref().expect("checked mandatory");
        let template = settings.output.as_deref().expect("checked mandatory");
        let public_folder = settings.public_folder.as_deref();

        // Wildcards first: the output template expands against concrete files.
        let resolved = resolve_input(input_spec, public_folder)?;

        let output = plan_output(&resolved, template, public_folder, settings.replace_in_place);

        // Public folder last, idempotent: wildcard matches already carry it.
        let inputs: Vec<PathBuf> = resolved
            .iter()
            .map(|path| match public_folder {
                Some(folder) => PathBuf::from(apply_public_folder(path, folder)),
                None => PathBuf::from(path),
            })
            .collect();

        debug!(
            "Resolved file plan: {} input(s), {} output(s), compressor {}",
            inputs.len(),
            output.len(),
            settings.compressor
        );

        Ok(ResolvedPlan {
            compressor: settings.compressor.clone(),
            task: PlanTask::Files { inputs, output },
            options: settings.options.clone(),
            buffer: settings.buffer,
            sync: settings.sync,
        })
    }

    /// Validate mandatory fields for the profile the settings select.
    fn check_mandatories(settings: &Settings) -> Result<(), MinifyError> {
        if settings.compressor.is_empty() {
            return Err(MinifyError::MissingMandatoryField("compressor"));
        }

        // In-memory profile: content alone is enough.
        if provided(&settings.content).is_some() {
            return Ok(());
        }

        // File profile: input and output, in mandatory-check order.
        if settings.input.as_ref().map_or(true, |input| input.is_empty()) {
            return Err(MinifyError::MissingMandatoryField("input"));
        }
        if settings.output.as_deref().map_or(true, str::is_empty) {
            return Err(MinifyError::MissingMandatoryField("output"));
        }

        Ok(())
    }
}

/// An empty string counts as absent, matching the historical contract.
fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
