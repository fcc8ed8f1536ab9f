//! # Dispatcher Module
//!
//! Questo modulo esegue un `ResolvedPlan` contro l'adapter selezionato.
//!
//! ## Responsabilità:
//! - Modalità in-memory: una invocazione, risultato restituito direttamente
//! - Modalità concat: una invocazione con tutti gli input, un output condiviso
//! - Modalità per-input: una invocazione per coppia input/output,
//!   best-effort (un fallimento non blocca le coppie rimanenti)
//! - Scrittura output con creazione directory on-demand
//! - Scheduling: sequenziale (`sync`) o concorrente (`join_all`)
//! - Cancellazione cooperativa via canale broadcast
//!
//! ## Gestione errori:
//! - I fallimenti dei singoli task vengono raccolti e aggregati in un
//!   `MinifyError::Batch`; nessun retry, at-most-once per input
//! - Errori di scrittura sempre propagati

use crate::compressors::{Compressor, CompressorTask};
use crate::error::MinifyError;
use crate::file_manager::FileManager;
use crate::output_planner::OutputTarget;
use crate::resolver::{PlanTask, ResolvedPlan};
use futures::future::join_all;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Result of one executed plan
#[derive(Debug, Clone, PartialEq)]
pub enum MinifiedOutput {
    /// In-memory mode: the minified string, nothing written to disk
    Content(String),
    /// File mode: the output files actually written
    Files(Vec<PathBuf>),
}

/// Executes resolved plans against a compressor adapter
pub struct Dispatcher {
    stop_receiver: Option<broadcast::Receiver<()>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            stop_receiver: None,
        }
    }

    /// Dispatcher with cooperative cancellation. Spawned children use
    /// `kill_on_drop`, so abandoning the run also terminates subprocesses.
    pub fn with_cancellation(stop_receiver: broadcast::Receiver<()>) -> Self {
        Self {
            stop_receiver: Some(stop_receiver),
        }
    }

    /// Checks if a stop signal has been received.
    fn should_stop(&mut self) -> bool {
        if let Some(ref mut receiver) = self.stop_receiver {
            match receiver.try_recv() {
                Ok(_) => true,
                Err(broadcast::error::TryRecvError::Empty) => false,
                Err(broadcast::error::TryRecvError::Lagged(_)) => true,
                Err(broadcast::error::TryRecvError::Closed) => false,
            }
        } else {
            false
        }
    }

    /// Execute the plan and write its outputs.
    pub async fn execute(
        &mut self,
        plan: &ResolvedPlan,
        compressor: &dyn Compressor,
    ) -> Result<MinifiedOutput, MinifyError> {
        if self.should_stop() {
            return Err(MinifyError::Cancelled);
        }

        match &plan.task {
            PlanTask::InMemory { content } => {
                let task = CompressorTask {
                    inputs: &[],
                    content: Some(content),
                    options: &plan.options,
                    buffer: plan.buffer,
                };
                let minified = compressor.run(&task).await?;
                Ok(MinifiedOutput::Content(minified))
            }
            PlanTask::Files { inputs, output } => {
                if inputs.is_empty() {
                    // A wildcard that matched nothing is a valid, degenerate plan.
                    warn!("Resolved input set is empty, nothing to compress");
                    return Ok(MinifiedOutput::Files(Vec::new()));
                }

                match output {
                    OutputTarget::Concat(path) => {
                        debug!(
                            "Concat mode: {} input(s) -> {}",
                            inputs.len(),
                            path.display()
                        );
                        let task = CompressorTask {
                            inputs,
                            content: None,
                            options: &plan.options,
                            buffer: plan.buffer,
                        };
                        let minified = compressor.run(&task).await?;
                        FileManager::write_file(path, &minified).await?;
                        Ok(MinifiedOutput::Files(vec![path.clone()]))
                    }
                    OutputTarget::PerInput(outputs) => {
                        self.execute_batch(plan, compressor, inputs, outputs).await
                    }
                }
            }
        }
    }

    /// Best-effort batch: every pair is attempted, failures are collected.
    async fn execute_batch(
        &mut self,
        plan: &ResolvedPlan,
        compressor: &dyn Compressor,
        inputs: &[PathBuf],
        outputs: &[PathBuf],
    ) -> Result<MinifiedOutput, MinifyError> {
        let total = inputs.len();
        let mut written = Vec::new();
        let mut failures: Vec<(PathBuf, MinifyError)> = Vec::new();

        if plan.sync {
            for (input, output) in inputs.iter().zip(outputs) {
                if self.should_stop() {
                    return Err(MinifyError::Cancelled);
                }
                match compress_pair(plan, compressor, input, output).await {
                    Ok(path) => written.push(path),
                    Err(err) => failures.push((input.clone(), err)),
                }
            }
        } else {
            let tasks = inputs
                .iter()
                .zip(outputs)
                .map(|(input, output)| compress_pair(plan, compressor, input, output));

            for (input, result) in inputs.iter().zip(join_all(tasks).await) {
                match result {
                    Ok(path) => written.push(path),
                    Err(err) => failures.push((input.clone(), err)),
                }
            }
        }

        if !failures.is_empty() {
            let detail = failures
                .iter()
                .map(|(input, err)| format!("{}: {}", input.display(), err))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MinifyError::Batch {
                failed: failures.len(),
                total,
                detail,
            });
        }

        Ok(MinifiedOutput::Files(written))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress one input/output pair and write the result.
async fn compress_pair(
    plan: &ResolvedPlan,
    compressor: &dyn Compressor,
    input: &PathBuf,
    output: &PathBuf,
) -> Result<PathBuf, MinifyError> {
    let task = CompressorTask {
        inputs: std::slice::from_ref(input),
        content: None,
        options: &plan.options,
        buffer: plan.buffer,
    };
    let minified = compressor.run(&task).await?;
    FileManager::write_file(output, &minified).await?;
    Ok(output.clone())
}
