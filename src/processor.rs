//! Core template processing orchestration: walks the template source tree,
//! renders templated paths and file bodies, honors ignore patterns and the
//! resolved manifest's presence decisions, then writes the manifest's own
//! files into the destination.

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::resolver::ResolvedManifest;
use crate::schema::OptionSet;
use globset::GlobSet;
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and
///   `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Whether a file name carries the template suffix on top of its real
/// extension, e.g. `README.md.j2`.
pub fn is_template_path(filename: &str) -> bool {
    let parts: Vec<&str> = filename.split('.').collect();
    parts.len() > 2 && filename.ends_with(TEMPLATE_SUFFIX)
}

/// Maps a rendered relative path into the output directory, stripping the
/// template suffix. Returns the target path and whether the body should be
/// rendered.
pub fn resolve_target_path<P: AsRef<Path>>(processed_path: &str, output_dir: P) -> (PathBuf, bool) {
    let output_dir = output_dir.as_ref();
    if let Some(filename) = Path::new(processed_path).file_name().and_then(|n| n.to_str()) {
        if is_template_path(filename) {
            let stripped = filename.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(filename);
            let target = output_dir.join(Path::new(processed_path).with_file_name(stripped));
            return (target, true);
        }
    }
    (output_dir.join(processed_path), false)
}

/// A rendered relative path is invalid when a conditional expression
/// evaluated to nothing somewhere inside it.
pub fn is_rendered_path_valid(rendered: &str) -> bool {
    !rendered.is_empty() && !rendered.starts_with('/') && !rendered.contains("//")
}

fn write_file(dest_path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(dest_path, content).map_err(Error::IoError)
}

fn copy_file(source_path: &Path, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::copy(source_path, dest_path).map(|_| ()).map_err(Error::IoError)
}

/// Walks a template tree and writes the generated project.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    options: &'a OptionSet,
    ignored: &'a GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        options: &'a OptionSet,
        ignored: &'a GlobSet,
    ) -> Self {
        Self { engine, template_root, output_root, options, ignored }
    }

    /// Renders the template tree, then materializes the resolved manifest.
    /// Manifest outputs are written last so they win over tree files with
    /// the same path.
    ///
    /// Returns the paths written, relative to the output root.
    pub fn run(&self, manifest: &ResolvedManifest) -> Result<Vec<PathBuf>> {
        let mut written = self.render_tree(manifest)?;
        written.extend(self.write_manifest(manifest)?);
        Ok(written)
    }

    fn render_tree(&self, manifest: &ResolvedManifest) -> Result<Vec<PathBuf>> {
        let context = self.options.as_context();
        let absent = self.absent_paths(manifest)?;
        let mut written = Vec::new();

        for dir_entry in WalkDir::new(self.template_root) {
            let entry = dir_entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            let path = entry.path();
            let relative_path = path
                .strip_prefix(self.template_root)
                .map_err(|e| Error::TemplateError(e.to_string()))?;
            let Some(relative_str) = relative_path.to_str() else {
                warn!("Skipping non-UTF-8 path: {}", relative_path.display());
                continue;
            };
            if relative_str.is_empty() || self.ignored.is_match(relative_str) {
                continue;
            }

            match self.process_entry(path, relative_str, &context, &absent) {
                Ok(Some(target)) => written.push(target),
                Ok(None) => {}
                Err(e @ Error::ProcessError { .. }) => warn!("{}", e),
                Err(e) => return Err(e),
            }
        }

        Ok(written)
    }

    fn process_entry(
        &self,
        path: &Path,
        relative_str: &str,
        context: &serde_json::Value,
        absent: &HashSet<String>,
    ) -> Result<Option<PathBuf>> {
        debug!("Processing source file: {}", relative_str);

        let rendered = self.engine.render(relative_str, context)?;
        if !is_rendered_path_valid(&rendered) {
            debug!("Skipping '{}': path rendered to nothing", relative_str);
            return Ok(None);
        }

        let (target_path, render_body) = resolve_target_path(&rendered, self.output_root);
        let manifest_key = target_path
            .strip_prefix(self.output_root)
            .unwrap_or(&target_path)
            .to_string_lossy()
            .to_string();
        if absent.contains(&manifest_key) {
            debug!("Skipping '{}': disabled for this option set", manifest_key);
            return Ok(None);
        }

        if path.is_dir() {
            fs::create_dir_all(&target_path).map_err(Error::IoError)?;
            return Ok(None);
        }

        if render_body {
            let body = fs::read_to_string(path).map_err(|e| Error::ProcessError {
                source_path: relative_str.to_string(),
                message: e.to_string(),
            })?;
            let content = self.engine.render(&body, context)?;
            write_file(&target_path, &content)?;
        } else {
            copy_file(path, &target_path)?;
        }

        Ok(Some(PathBuf::from(manifest_key)))
    }

    fn write_manifest(&self, manifest: &ResolvedManifest) -> Result<Vec<PathBuf>> {
        let outputs = manifest.materialize(self.options, self.engine)?;
        let mut written = Vec::new();
        for (relative, content) in outputs {
            let target = self.output_root.join(&relative);
            write_file(&target, &content)?;
            written.push(PathBuf::from(relative));
        }
        Ok(written)
    }

    /// Rendered paths the manifest marks absent for this option set; tree
    /// files matching one are skipped instead of copied.
    fn absent_paths(&self, manifest: &ResolvedManifest) -> Result<HashSet<String>> {
        let context = self.options.as_context();
        let mut absent = HashSet::new();
        for (target, present) in manifest.targets() {
            if !present {
                absent.insert(self.engine.render(target, &context)?);
            }
        }
        Ok(absent)
    }
}
