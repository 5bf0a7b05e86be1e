//! Conditional artifact resolution: evaluates an [`ArtifactRule`] index
//! against a resolved [`OptionSet`] and aggregates the matches into a
//! [`ResolvedManifest`] describing which files exist and what the
//! composable files contain.
//!
//! Aggregation order is rule-declaration order throughout, never map
//! iteration order, so resolving the same option set twice yields
//! byte-identical output.

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::rules::{ArtifactRule, DependencyEntry, DependencySection, Effect, TaskEntry};
use crate::schema::OptionSet;
use indexmap::IndexMap;

/// The generated project's dependency manifest.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// The standalone task-runner file, present only under the `just` front end.
pub const JUSTFILE: &str = "justfile";

/// The license file; exactly one emit rule must match per option set.
pub const LICENSE_FILE: &str = "LICENSE.md";

/// Logical target collecting task entries; the composers route them into
/// the manifest's script table or the justfile.
pub const TASKS_TARGET: &str = "tasks";

/// Name of the composite quality-assurance task.
pub const QA_TASK: &str = "qa";

/// Where task definitions live for a given option set. Exactly one variant
/// holds for any resolution, which is the mutual-exclusivity invariant
/// between manifest-embedded scripts and a standalone justfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLocation {
    ManifestScripts,
    Justfile,
}

/// Per-target aggregation: a whole-file emission and/or ordered fragments.
#[derive(Debug, Clone, Default)]
pub struct FilePlan {
    emitted: Option<&'static str>,
    fragments: Vec<&'static str>,
}

impl FilePlan {
    fn is_present(&self) -> bool {
        self.emitted.is_some() || !self.fragments.is_empty()
    }
}

/// The resolver's output: file presence plus composite-file content
/// obligations for one option set. Created fresh per resolution and
/// consumed immediately; never persisted.
#[derive(Debug)]
pub struct ResolvedManifest {
    task_location: TaskLocation,
    files: IndexMap<String, FilePlan>,
    dependencies: Vec<DependencyEntry>,
    tasks: Vec<TaskEntry>,
}

impl ResolvedManifest {
    pub fn task_location(&self) -> TaskLocation {
        self.task_location
    }

    /// Whether a target path exists for this option set. Targets are the
    /// unrendered rule paths (they may contain template expressions).
    pub fn is_present(&self, target: &str) -> bool {
        match target {
            MANIFEST_FILE => true,
            JUSTFILE => self.task_location == TaskLocation::Justfile,
            _ => self.files.get(target).map(FilePlan::is_present).unwrap_or(false),
        }
    }

    pub fn requirements(&self, section: DependencySection) -> Vec<&'static str> {
        self.dependencies
            .iter()
            .filter(|dep| dep.section == section)
            .map(|dep| dep.requirement)
            .collect()
    }

    pub fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }

    /// Every file target known to the rule index, with its presence for
    /// this option set. The justfile target is included so callers can
    /// treat it uniformly.
    pub fn targets(&self) -> impl Iterator<Item = (&str, bool)> {
        std::iter::once((JUSTFILE, self.task_location == TaskLocation::Justfile)).chain(
            self.files.iter().map(|(target, plan)| (target.as_str(), plan.is_present())),
        )
    }

    /// Members of the composite qa task, in declaration order.
    pub fn qa_tasks(&self) -> Vec<&'static str> {
        self.tasks.iter().filter(|task| task.qa).map(|task| task.name).collect()
    }

    /// Renders every resolved file into its final path and content.
    ///
    /// The composed manifest and justfile are inserted verbatim; rule-based
    /// contents and target paths go through the template engine with the
    /// option set as context.
    pub fn materialize(
        &self,
        options: &OptionSet,
        engine: &dyn TemplateRenderer,
    ) -> Result<IndexMap<String, String>> {
        let context = options.as_context();
        let mut outputs = IndexMap::new();

        outputs.insert(MANIFEST_FILE.to_string(), self.compose_manifest(options));
        if self.task_location == TaskLocation::Justfile {
            outputs.insert(JUSTFILE.to_string(), self.compose_justfile());
        }

        for (target, plan) in &self.files {
            if !plan.is_present() {
                continue;
            }
            let path = engine.render(target, &context)?;
            let mut parts = Vec::new();
            if let Some(content) = plan.emitted {
                parts.push(engine.render(content, &context)?);
            }
            for fragment in &plan.fragments {
                parts.push(engine.render(fragment, &context)?);
            }
            let mut content = parts.join("\n");
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            outputs.insert(path, content);
        }

        Ok(outputs)
    }

    /// Assembles the generated project's `pyproject.toml` from the
    /// collected dependency and task entries.
    fn compose_manifest(&self, options: &OptionSet) -> String {
        let module = options.text("module_name");
        let mut out = String::new();

        out.push_str("[project]\n");
        out.push_str(&format!("name = \"{}\"\n", options.text("project_slug")));
        out.push_str(&format!("version = \"{}\"\n", options.text("version")));
        out.push_str(&format!("description = \"{}\"\n", options.text("project_description")));
        out.push_str(&format!(
            "authors = [{{ name = \"{}\", email = \"{}\" }}]\n",
            options.text("author_name"),
            options.text("author_email"),
        ));
        out.push_str("readme = \"README.md\"\n");
        out.push_str(&format!("license = {{ text = \"{}\" }}\n", options.text("license")));
        out.push_str(&format!("requires-python = \">={}\"\n", options.text("python_version")));
        push_requirement_list(
            &mut out,
            "dependencies",
            &self.requirements(DependencySection::Runtime),
        );

        if options.flag("cli") {
            out.push_str("\n[project.scripts]\n");
            out.push_str(&format!(
                "{} = \"{}.cli.__main__:app\"\n",
                options.text("project_slug"),
                module,
            ));
        }

        out.push_str("\n[tool.pdm]\ndistribution = true\n");
        out.push_str("\n[tool.pdm.dev-dependencies]\n");
        push_requirement_list(&mut out, "dev", &self.requirements(DependencySection::Dev));

        if self.task_location == TaskLocation::ManifestScripts {
            out.push_str("\n[tool.pdm.scripts]\n");
            for task in &self.tasks {
                out.push_str(&format!("{} = {{ cmd = \"{}\" }}\n", task.name, task.command));
            }
            let qa = self
                .qa_tasks()
                .iter()
                .map(|name| format!("\"{}\"", name))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("{} = {{ composite = [{}] }}\n", QA_TASK, qa));
        }

        out.push_str("\n[tool.pytest.ini_options]\n");
        let mut addopts = format!("--cov={}", module);
        if options.flag("use_codecov") {
            addopts.push_str(" --cov-report=xml");
        }
        if options.flag("strict_testing") {
            addopts.push_str(&format!(
                " --strict-config --strict-markers --typeguard-packages={}",
                module
            ));
        }
        out.push_str(&format!("addopts = \"{}\"\n", addopts));
        out.push_str("testpaths = [\"tests\"]\n");

        out.push_str("\n[tool.mypy]\nstrict = true\n");

        out.push_str("\n[tool.commitizen]\n");
        out.push_str("name = \"cz_conventional_commits\"\n");
        out.push_str("tag_format = \"v$version\"\n");
        out.push_str("version_provider = \"pep621\"\n");
        out.push_str("update_changelog_on_bump = true\n");
        out.push_str("changelog_file = \"CHANGELOG.md\"\n");
        out.push_str("bump_message = \"bump: version $current_version -> $new_version\"\n");

        if options.flag("use_semantic_release") {
            out.push_str("\n[tool.semantic_release]\n");
            out.push_str("version_toml = [\"pyproject.toml:project.version\"]\n");
        }

        out
    }

    /// Assembles the standalone justfile. Recipes delegate to the project
    /// environment through `pdm run`, so task semantics do not depend on
    /// the front end.
    fn compose_justfile(&self) -> String {
        let mut out = String::new();
        out.push_str("default:\n    @just --list\n");
        for task in &self.tasks {
            out.push_str(&format!(
                "\n{} *args:\n    pdm run {} {{{{args}}}}\n",
                task.name, task.command
            ));
        }
        out.push_str(&format!("\n{}:\n", QA_TASK));
        for name in self.qa_tasks() {
            out.push_str(&format!("    @just {}\n", name));
        }
        out
    }
}

/// Evaluates every rule against the option set and aggregates the matches.
///
/// # Errors
/// * `Error::InvalidValueError` when `task_runner` holds an unknown value
/// * `Error::ConflictingRuleError` when two whole-file rules match the
///   same target
/// * `Error::UnsupportedLicenseError` when a `license` option is present
///   but no license emit rule matched it
pub fn resolve(options: &OptionSet, rules: &[ArtifactRule]) -> Result<ResolvedManifest> {
    let task_location = match options.text("task_runner") {
        "pdm" => TaskLocation::ManifestScripts,
        "just" => TaskLocation::Justfile,
        other => {
            return Err(Error::InvalidValueError {
                option: "task_runner".to_string(),
                value: other.to_string(),
                expected: "one of: pdm, just".to_string(),
            })
        }
    };

    let mut files: IndexMap<String, FilePlan> = IndexMap::new();
    let mut dependencies = Vec::new();
    let mut tasks = Vec::new();

    for rule in rules {
        // Register every file target so absent paths are distinguishable
        // from paths no rule knows about.
        if matches!(rule.effect, Effect::EmitFile { .. } | Effect::IncludeFragment { .. }) {
            files.entry(rule.target.to_string()).or_default();
        }
        if !rule.predicate.eval(options) {
            continue;
        }
        match &rule.effect {
            Effect::EmitFile { content } => {
                let plan = files.entry(rule.target.to_string()).or_default();
                if plan.emitted.is_some() {
                    return Err(Error::ConflictingRuleError {
                        target: rule.target.to_string(),
                    });
                }
                plan.emitted = Some(*content);
            }
            Effect::IncludeFragment { content } => {
                files.entry(rule.target.to_string()).or_default().fragments.push(*content);
            }
            Effect::AppendDependency(dependency) => dependencies.push(dependency.clone()),
            Effect::AppendTask(task) => tasks.push(task.clone()),
        }
    }

    // An unmapped license value must fail loudly, never default silently.
    if let Some(license) = options.get("license") {
        if !files.get(LICENSE_FILE).map(FilePlan::is_present).unwrap_or(false) {
            let license = match license.as_str() {
                Some(value) => value.to_string(),
                None => license.to_string(),
            };
            return Err(Error::UnsupportedLicenseError { license });
        }
    }

    Ok(ResolvedManifest { task_location, files, dependencies, tasks })
}

fn push_requirement_list(out: &mut String, key: &str, requirements: &[&str]) {
    out.push_str(&format!("{} = [\n", key));
    for requirement in requirements {
        out.push_str(&format!("    \"{}\",\n", requirement));
    }
    out.push_str("]\n");
}
