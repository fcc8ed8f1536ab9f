//! # esbuild Adapter
//!
//! Spawns the native esbuild binary. Source text is streamed over stdin and
//! the minified result is captured from stdout, so no staging file is
//! needed. Options use camelCase keys converted to esbuild's
//! `--kebab-case=value` flag style.

use super::{command, filter_options, Compressor, CompressorTask};
use crate::error::MinifyError;
use crate::platform::PlatformCommands;
use crate::utils::{camel_to_kebab, value_to_arg};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

const ACCEPTED_OPTIONS: &[&str] = &[
    "target",
    "format",
    "charset",
    "loader",
    "keepNames",
    "legalComments",
];

#[derive(Debug)]
pub struct Esbuild;

impl Esbuild {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esbuild {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the esbuild argument list (`--flag` / `--flag=value` style).
fn cli_args(options: &HashMap<String, Value>) -> Vec<String> {
    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();

    let mut args = vec!["--minify".to_string()];
    for key in keys {
        let flag = camel_to_kebab(key);
        match &options[key] {
            Value::Bool(true) => args.push(format!("--{}", flag)),
            Value::Bool(false) => {}
            other => args.push(format!("--{}={}", flag, value_to_arg(other))),
        }
    }
    args
}

#[async_trait]
impl Compressor for Esbuild {
    fn name(&self) -> &'static str {
        "esbuild"
    }

    fn accepted_options(&self) -> &'static [&'static str] {
        ACCEPTED_OPTIONS
    }

    async fn run(&self, task: &CompressorTask<'_>) -> Result<String, MinifyError> {
        let platform = PlatformCommands::instance();
        if !platform.is_command_available("esbuild").await {
            return Err(MinifyError::MissingDependency(
                "esbuild binary not found in PATH".to_string(),
            ));
        }

        let options = filter_options(task.options, ACCEPTED_OPTIONS);
        let args = cli_args(&options);
        let source = task.source().await?;

        let outcome = command::run_process(
            platform.get_command("esbuild"),
            &args,
            Some(&source),
            task.buffer,
        )
        .await?;
        command::evaluate(outcome, "esbuild")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_args_equals_style() {
        let mut options = HashMap::new();
        options.insert("target".to_string(), json!("es2017"));
        options.insert("keepNames".to_string(), json!(true));
        options.insert("loader".to_string(), json!("css"));

        let args = cli_args(&options);
        assert_eq!(
            args,
            vec!["--minify", "--keep-names", "--loader=css", "--target=es2017"]
        );
    }

    #[test]
    fn test_minify_flag_always_present() {
        assert_eq!(cli_args(&HashMap::new()), vec!["--minify"]);
    }
}
