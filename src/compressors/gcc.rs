//! # Google Closure Compiler Adapter
//!
//! Runs the Closure Compiler JAR. Input files are passed directly with
//! repeated `--js` flags (the compiler concatenates them itself); an
//! in-memory payload is staged in a scratch file first and cleaned up after
//! the run. Options use the upstream camelCase keys and are converted to the
//! JAR's snake_case flags.

use super::{command, filter_options, stage_source, Compressor, CompressorTask};
use crate::error::MinifyError;
use crate::jar_resolver::{JarResolver, JAR_DIR_ENV};
use crate::utils::{build_flag_args, camel_to_snake};
use async_trait::async_trait;
use tempfile::NamedTempFile;

const JAR_NAME: &str = "closure-compiler-v20230802.jar";

// The allowed flags, taken from https://github.com/google/closure-compiler
const ACCEPTED_OPTIONS: &[&str] = &[
    "angularPass",
    "applyInputSourceMaps",
    "assumeFunctionWrapper",
    "checksOnly",
    "compilationLevel",
    "createSourceMap",
    "dartPass",
    "defines",
    "env",
    "externs",
    "exportLocalPropertyDefinitions",
    "generateExports",
    "languageIn",
    "languageOut",
    "newTypeInf",
    "outputWrapper",
    "polymerVersion",
    "preserveTypeAnnotations",
    "processCommonJsModules",
    "renamePrefixNamespace",
    "rewritePolyfills",
    "useTypesForOptimization",
    "warningLevel",
];

#[derive(Debug)]
pub struct ClosureCompiler {
    jars: JarResolver,
}

impl ClosureCompiler {
    pub fn new() -> Self {
        Self {
            jars: JarResolver::new(),
        }
    }
}

impl Default for ClosureCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Compressor for ClosureCompiler {
    fn name(&self) -> &'static str {
        "gcc"
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

        let options = filter_options(task.options, ACCEPTED_OPTIONS);
        let mut args = build_flag_args(&options, camel_to_snake);

        // Staged scratch file must outlive the run; drop removes it on
        // every exit path.
        let _scratch: Option<NamedTempFile>;
        match task.content {
            Some(content) => {
                let scratch = stage_source(content, ".js").await?;
                args.push("--js".to_string());
                args.push(scratch.path().display().to_string());
                _scratch = Some(scratch);
            }
            None => {
                for input in task.inputs {
                    args.push("--js".to_string());
                    args.push(input.display().to_string());
                }
                _scratch = None;
            }
        }

        let outcome = command::run_jar(&jar, &args, None, task.buffer).await?;
        command::evaluate(outcome, "gcc")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_flags_use_snake_case_names() {
        let mut options = HashMap::new();
        options.insert("compilationLevel".to_string(), json!("ADVANCED_OPTIMIZATIONS"));
        options.insert("languageIn".to_string(), json!("ECMASCRIPT_2020"));

        let filtered = filter_options(&options, ACCEPTED_OPTIONS);
        let args = build_flag_args(&filtered, camel_to_snake);
        assert_eq!(
            args,
            vec![
                "--compilation_level",
                "ADVANCED_OPTIMIZATIONS",
                "--language_in",
                "ECMASCRIPT_2020",
            ]
        );
    }

    #[test]
    fn test_unknown_flags_never_reach_the_jar() {
        let mut options = HashMap::new();
        options.insert("compilationLevel".to_string(), json!("SIMPLE"));
        options.insert("rmDashRf".to_string(), json!(true));

        let filtered = filter_options(&options, ACCEPTED_OPTIONS);
        assert_eq!(filtered.len(), 1);
        assert!(!filtered.contains_key("rmDashRf"));
    }
}
