//! # Output Planning Module
//!
//! Deriva i path di output concreti dal template utente.
//!
//! ## Responsabilità:
//! - Template senza placeholder: un unico output condiviso (concatenation mode)
//! - Template con `$1`: un output per input, placeholder sostituito con il
//!   base name dell'input (directory ed estensione rimosse)
//! - Modalità in-place: output accanto al rispettivo input, public folder
//!   ignorata
//! - Public folder applicata ai path derivati solo se non già presente

use crate::path_resolver::apply_public_folder;
use std::path::{Path, PathBuf};

/// Placeholder token substituted with each input's base name.
pub const PLACEHOLDER: &str = "$1";

/// Concrete output destination(s) for a resolved plan.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    /// One shared output file fed by every input (concatenation mode)
    Concat(PathBuf),
    /// One output per input, same cardinality and order as the inputs
    PerInput(Vec<PathBuf>),
}

impl OutputTarget {
    /// Number of distinct output files the target will produce.
    pub fn len(&self) -> usize {
        match self {
            OutputTarget::Concat(_) => 1,
            OutputTarget::PerInput(paths) => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derive the output target for the given resolved inputs.
pub fn plan_output(
    inputs: &[String],
    template: &str,
    public_folder: Option<&str>,
    replace_in_place: bool,
) -> OutputTarget {
    if !template.contains(PLACEHOLDER) {
        // Shared output, used verbatim for every input.
        return OutputTarget::Concat(PathBuf::from(template));
    }

    let outputs = inputs
        .iter()
        .map(|input| derive_one(input, template, public_folder, replace_in_place))
        .collect();

    OutputTarget::PerInput(outputs)
}

/// Expand the template for one input path.
fn derive_one(
    input: &str,
    template: &str,
    public_folder: Option<&str>,
    replace_in_place: bool,
) -> PathBuf {
    let expanded = template.replace(PLACEHOLDER, &base_name(input));

    if replace_in_place {
        // Output lands next to its input, public folder is not applied.
        let parent = Path::new(input).parent().unwrap_or_else(|| Path::new(""));
        return parent.join(expanded);
    }

    match public_folder {
        Some(folder) => PathBuf::from(apply_public_folder(&expanded, folder)),
        None => PathBuf::from(expanded),
    }
}

/// Base file name of a path: directory and extension stripped, where the
/// extension starts at the first dot (`app.min.js` -> `app`).
fn base_name(input: &str) -> String {
    Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_placeholder_expands_per_input() {
        let inputs = strings(&["a.js", "b.js"]);
        let target = plan_output(&inputs, "dist/$1.min.js", None, false);
        assert_eq!(
            target,
            OutputTarget::PerInput(vec![
                PathBuf::from("dist/a.min.js"),
                PathBuf::from("dist/b.min.js"),
            ])
        );
        assert_eq!(target.len(), inputs.len());
    }

    #[test]
    fn test_no_placeholder_is_concat_mode() {
        let inputs = strings(&["a.js", "b.js"]);
        let target = plan_output(&inputs, "dist/bundle.min.js", None, false);
        assert_eq!(target, OutputTarget::Concat(PathBuf::from("dist/bundle.min.js")));
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_replace_in_place_ignores_public_folder() {
        let inputs = strings(&["public/js/app.js"]);
        let target = plan_output(&inputs, "$1.min.js", Some("public/"), true);
        assert_eq!(
            target,
            OutputTarget::PerInput(vec![PathBuf::from("public/js/app.min.js")])
        );
    }

    #[test]
    fn test_public_folder_prefixes_derived_output_once() {
        let inputs = strings(&["public/app.js"]);
        let target = plan_output(&inputs, "public/$1.min.js", Some("public/"), false);
        // Template already carries the prefix: must not be duplicated.
        assert_eq!(
            target,
            OutputTarget::PerInput(vec![PathBuf::from("public/app.min.js")])
        );

        let target = plan_output(&inputs, "$1.min.js", Some("public/"), false);
        assert_eq!(
            target,
            OutputTarget::PerInput(vec![PathBuf::from("public/app.min.js")])
        );
    }

    #[test]
    fn test_base_name_strips_directory_and_extension() {
        assert_eq!(base_name("src/vendor/app.js"), "app");
        assert_eq!(base_name("app.test.js"), "app");
        assert_eq!(base_name("noext"), "noext");
    }
}
