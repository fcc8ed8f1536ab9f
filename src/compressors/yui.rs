//! # YUI Compressor Adapter
//!
//! Runs the YUI Compressor JAR against JavaScript or CSS sources. The JAR
//! reads exactly one input file, so the adapter stages its source text
//! (in-memory payload or concatenated input files) in a scratch file that is
//! removed once the run completes, whatever the outcome.

use super::{command, filter_options, stage_source, Compressor, CompressorTask};
use crate::error::MinifyError;
use crate::jar_resolver::{JarResolver, JAR_DIR_ENV};
use crate::utils::build_flag_args;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

const JAR_NAME: &str = "yuicompressor-2.4.8.jar";

/// Option keys forwarded to the JAR. The `type` key selects the js/css mode
/// and is consumed by the adapter itself.
const ACCEPTED_OPTIONS: &[&str] = &[
    "type",
    "charset",
    "line-break",
    "nomunge",
    "preserve-semi",
    "disable-optimizations",
];

#[derive(Debug)]
pub struct Yui {
    jars: JarResolver,
}

impl Yui {
    pub fn new() -> Self {
        Self {
            jars: JarResolver::new(),
        }
    }
}

impl Default for Yui {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the JAR argument list for one staged source file.
fn jar_args(file_type: &str, options: &HashMap<String, Value>, source: &Path) -> Vec<String> {
    let mut args = crate::args!["--type", file_type];
    args.extend(build_flag_args(options, str::to_string));
    args.push(source.display().to_string());
    args
}

#[async_trait]
impl Compressor for Yui {
    fn name(&self) -> &'static str {
        "yui"
    }

    fn accepted_options(&self) -> &'static [&'static str] {
        ACCEPTED_OPTIONS
    }

    async fn run(&self, task: &CompressorTask<'_>) -> Result<String, MinifyError> {
        let jar = self.jars.resolve(JAR_NAME).ok_or_else(|| {
            MinifyError::MissingDependency(format!(
                "{} not found (set {} to the directory holding it)",
                JAR_NAME, JAR_DIR_ENV
            ))
        })?;

        let mut options = filter_options(task.options, ACCEPTED_OPTIONS);
        let file_type = options
            .remove("type")
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_else(|| "js".to_string());

        let source = task.source().await?;

        // Scratch file removed on drop, success or failure alike.
        let scratch = stage_source(&source, &format!(".{}", file_type)).await?;

        let args = jar_args(&file_type, &options, scratch.path());
        let outcome = command::run_jar(&jar, &args, None, task.buffer).await?;
        command::evaluate(outcome, "yui")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jar_args_type_first_then_options_then_source() {
        let mut options = HashMap::new();
        options.insert("line-break".to_string(), json!(80));
        options.insert("nomunge".to_string(), json!(true));

        let args = jar_args("css", &options, Path::new("/tmp/scratch.css"));
        assert_eq!(
            args,
            vec!["--type", "css", "--line-break", "80", "--nomunge", "/tmp/scratch.css"]
        );
    }

    #[test]
    fn test_unknown_options_are_dropped() {
        let mut options = HashMap::new();
        options.insert("nomunge".to_string(), json!(true));
        options.insert("compilationLevel".to_string(), json!("ADVANCED"));

        let filtered = filter_options(&options, ACCEPTED_OPTIONS);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("nomunge"));
    }
}
