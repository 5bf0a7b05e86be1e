//! File and directory ignore pattern handling for Armature templates.
//! This module processes .armatureignore files to exclude specific paths
//! from template processing, similar to .gitignore functionality.

use crate::constants::{CONFIG_FILES, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Patterns excluded from every template, before the template's own
/// ignore file is considered.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 5] =
    [".git", ".git/**", "**/.DS_Store", "hooks", "hooks/**"];

/// Reads the template's ignore file and builds the combined glob set.
///
/// # Arguments
/// * `template_dir` - Template directory that may contain an ignore file
///
/// # Notes
/// - If the ignore file doesn't exist, only the default patterns apply
/// - Each non-empty, non-comment line is treated as a separate glob pattern
/// - Invalid patterns result in an `Error::IgnoreError`
pub fn parse_ignore_file<P: AsRef<Path>>(template_dir: P) -> Result<GlobSet> {
    let ignore_path = template_dir.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::IgnoreError(format!("invalid default pattern: {}", e)))?,
        );
    }
    // The schema file and the ignore file itself describe the template;
    // they are never part of the generated output.
    for file in CONFIG_FILES {
        builder.add(
            Glob::new(file)
                .map_err(|e| Error::IgnoreError(format!("invalid default pattern: {}", e)))?,
        );
    }
    builder.add(
        Glob::new(IGNORE_FILE)
            .map_err(|e| Error::IgnoreError(format!("invalid default pattern: {}", e)))?,
    );

    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line).map_err(|e| {
                Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e))
            })?);
        }
    } else {
        debug!("{} does not exist", IGNORE_FILE);
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))
}
