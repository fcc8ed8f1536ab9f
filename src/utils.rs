//! # Utility Functions Module
//!
//! This module provides utility functions that improve code readability
//! and reduce boilerplate across the application.

use serde_json::Value;
use std::collections::HashMap;

/// Converts a vector of string-like items to Vec<String>.
///
/// This utility function accepts any iterable of items that can be converted
/// to String, eliminating repetitive `.to_string()` calls throughout the codebase.
///
/// # Example
/// ```rust
/// use asset_minifier::utils::to_string_vec;
///
/// let args = to_string_vec(["--type", "js", "--nomunge"]);
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Macro for even more convenient argument building.
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::string::ToString::to_string(&$item)),*]
    };
}

/// Renders a JSON option value as a command-line argument value.
///
/// Strings are used without surrounding quotes, everything else falls back
/// to its JSON representation.
pub fn value_to_arg(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds `--key value` argument pairs from an options map.
///
/// Keys are emitted in sorted order so the resulting argument list is
/// deterministic. A boolean `true` emits the bare flag, a boolean `false`
/// drops the option entirely. The `rename` hook converts the option key into
/// the flag name expected by the tool (identity, snake_case, kebab-case...).
pub fn build_flag_args(
    options: &HashMap<String, Value>,
    rename: fn(&str) -> String,
) -> Vec<String> {
    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();

    let mut args = Vec::new();
    for key in keys {
        let flag = format!("--{}", rename(key));
        match &options[key] {
            Value::Bool(true) => args.push(flag),
            Value::Bool(false) => {}
            other => {
                args.push(flag);
                args.push(value_to_arg(other));
            }
        }
    }
    args
}

/// Converts a camelCase option key to the snake_case flag name used by
/// JVM tools (`compilationLevel` -> `compilation_level`).
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Converts a camelCase option key to the kebab-case flag name used by
/// native tools (`keepNames` -> `keep-names`).
pub fn camel_to_kebab(key: &str) -> String {
    camel_to_snake(key).replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_string_vec_string_literals() {
        let result = to_string_vec(["hello", "world"]);
        assert_eq!(result, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_to_string_vec_mixed_types() {
        let num = 42;
        let result = to_string_vec(["--line-break", &num.to_string()]);
        assert_eq!(result, vec!["--line-break".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_args_macro() {
        let width = 80;
        let result = args!["--line-break", width, "--nomunge"];
        assert_eq!(
            result,
            vec!["--line-break".to_string(), "80".to_string(), "--nomunge".to_string()]
        );
    }

    #[test]
    fn test_build_flag_args() {
        let mut options = HashMap::new();
        options.insert("line-break".to_string(), json!(80));
        options.insert("nomunge".to_string(), json!(true));
        options.insert("preserve-semi".to_string(), json!(false));

        let args = build_flag_args(&options, |key| key.to_string());
        assert_eq!(args, vec!["--line-break", "80", "--nomunge"]);
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(camel_to_snake("compilationLevel"), "compilation_level");
        assert_eq!(camel_to_snake("languageIn"), "language_in");
        assert_eq!(camel_to_snake("externs"), "externs");
        assert_eq!(camel_to_kebab("keepNames"), "keep-names");
        assert_eq!(camel_to_kebab("target"), "target");
    }
}
