//! # JAR Resolver
//!
//! This module locates the compressor JARs (YUI Compressor, Google Closure
//! Compiler) across deployment environments:
//! - Explicit override via environment variable
//! - `jars/` directory next to the installed executable
//! - Development tree (walk up from the working directory)

use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable overriding the JAR search directory.
pub const JAR_DIR_ENV: &str = "ASSET_MINIFIER_JAR_DIR";

/// Locates bundled compressor JARs
#[derive(Debug)]
pub struct JarResolver {
    jar_dir: Option<PathBuf>,
}

impl JarResolver {
    pub fn new() -> Self {
        Self {
            jar_dir: Self::detect_jar_dir(),
        }
    }

    /// Detect the directory holding the bundled JARs.
    fn detect_jar_dir() -> Option<PathBuf> {
        // Strategy 1: explicit override
        if let Ok(dir) = env::var(JAR_DIR_ENV) {
            let path = PathBuf::from(dir);
            debug!("Checking {}: {:?}", JAR_DIR_ENV, path);
            if path.exists() {
                return Some(path);
            }
            warn!("{} points to a missing directory: {}", JAR_DIR_ENV, path.display());
        }

        // Strategy 2: jars/ next to the executable (installed layout)
        if let Ok(exe_path) = env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let path = exe_dir.join("jars");
                debug!("Checking executable-adjacent path: {:?}", path);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        // Strategy 3: development tree, walk up from the working directory
        if let Ok(mut search_dir) = env::current_dir() {
            for _ in 0..10 {
                let path = search_dir.join("jars");
                if path.exists() {
                    debug!("Found jars directory in development tree: {:?}", path);
                    return Some(path);
                }
                match search_dir.parent() {
                    Some(parent) => search_dir = parent.to_path_buf(),
                    None => break,
                }
            }
        }

        None
    }

    /// Resolve the full path of a named JAR, if present.
    pub fn resolve(&self, jar_name: &str) -> Option<PathBuf> {
        let dir = self.jar_dir.as_ref()?;
        let candidate = dir.join(jar_name);
        candidate.exists().then_some(candidate)
    }
}

impl Default for JarResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_jar_resolves_to_none() {
        let resolver = JarResolver::new();
        assert!(resolver.resolve("definitely-not-a-real-tool-9.9.9.jar").is_none());
    }
}
