//! # oxc Adapter
//!
//! In-process JavaScript minification via the oxc toolchain: parse, run the
//! minifier over the AST, regenerate compact code. No external binary is
//! involved; the CPU-bound work runs on the blocking pool.

use super::{filter_options, Compressor, CompressorTask};
use crate::error::MinifyError;
use async_trait::async_trait;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde_json::Value;

const ACCEPTED_OPTIONS: &[&str] = &["mangle", "compress"];

#[derive(Debug)]
pub struct Oxc;

impl Oxc {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Oxc {
    fn default() -> Self {
        Self::new()
    }
}

/// Minify one source text. Parse errors abort the run with the collected
/// diagnostics.
fn minify_source(
    source: &str,
    source_type: SourceType,
    mangle: bool,
    compress: bool,
) -> Result<String, MinifyError> {
    let allocator = Allocator::default();
    let parser = Parser::new(&allocator, source, source_type);
    let parsed = parser.parse();

    if !parsed.errors.is_empty() {
        let errors: Vec<String> = parsed
            .errors
            .iter()
            .map(|error| format!("Parse error: {}", error))
            .collect();
        return Err(MinifyError::Execution(errors.join("\n")));
    }

    let mut program = parsed.program;
    let options = MinifierOptions {
        mangle: if mangle {
            Some(MangleOptions::default())
        } else {
            None
        },
        compress: if compress {
            Some(CompressOptions::default())
        } else {
            None
        },
    };
    let minifier = Minifier::new(options);
    minifier.minify(&allocator, &mut program);

    let codegen_options = CodegenOptions {
        minify: true,
        ..Default::default()
    };
    let code = Codegen::new()
        .with_options(codegen_options)
        .build(&program)
        .code;

    Ok(code)
}

#[async_trait]
impl Compressor for Oxc {
    fn name(&self) -> &'static str {
        "oxc"
    }

    fn accepted_options(&self) -> &'static [&'static str] {
        ACCEPTED_OPTIONS
    }

    async fn run(&self, task: &CompressorTask<'_>) -> Result<String, MinifyError> {
        let options = filter_options(task.options, ACCEPTED_OPTIONS);
        let mangle = options.get("mangle").and_then(Value::as_bool).unwrap_or(true);
        let compress = options
            .get("compress")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        let source_type = task
            .inputs
            .first()
            .and_then(|path| SourceType::from_path(path).ok())
            .unwrap_or_default();

        let source = task.source().await?;

        tokio::task::spawn_blocking(move || minify_source(&source, source_type, mangle, compress))
            .await
            .map_err(|err| MinifyError::Execution(format!("Minification task failed: {}", err)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_minifies_in_memory_content() {
        let options = HashMap::new();
        let task = CompressorTask {
            inputs: &[],
            content: Some("function add(first, second) {\n  return first + second;\n}\n"),
            options: &options,
            buffer: 1024,
        };

        let minified = Oxc::new().run(&task).await.unwrap();
        assert!(!minified.is_empty());
        assert!(minified.len() < task.content.unwrap().len());
    }

    #[tokio::test]
    async fn test_parse_error_is_execution_error() {
        let options = HashMap::new();
        let task = CompressorTask {
            inputs: &[],
            content: Some("var = ;"),
            options: &options,
            buffer: 1024,
        };

        let err = Oxc::new().run(&task).await.unwrap_err();
        assert!(matches!(err, MinifyError::Execution(_)));
    }
}
