//! Declarative artifact rules: predicate over an option set, a target path
//! and an effect. The resolver aggregates all matching rules into a
//! [`crate::resolver::ResolvedManifest`].

use crate::schema::OptionSet;

/// Boolean expression over an [`OptionSet`].
#[derive(Debug, Clone)]
pub enum Predicate {
    Always,
    /// A boolean option is true
    Truthy(&'static str),
    /// A boolean option is false or absent
    Falsy(&'static str),
    /// An enum or string option equals the given value
    Eq(&'static str, &'static str),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn eval(&self, options: &OptionSet) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Truthy(name) => options.flag(name),
            Predicate::Falsy(name) => !options.flag(name),
            Predicate::Eq(name, value) => options.text(name) == *value,
            Predicate::All(inner) => inner.iter().all(|p| p.eval(options)),
            Predicate::Any(inner) => inner.iter().any(|p| p.eval(options)),
        }
    }
}

/// Which dependency list of the generated manifest an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencySection {
    Runtime,
    Dev,
}

/// One dependency requirement line, e.g. `typer[all]` or `pytest>=8`.
#[derive(Debug, Clone)]
pub struct DependencyEntry {
    pub requirement: &'static str,
    pub section: DependencySection,
}

/// One named maintenance task. `command` is a raw command line; the
/// task-runner composers wrap it in their own syntax. Tasks flagged with
/// `qa` join the composite quality-assurance task in declaration order.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    pub name: &'static str,
    pub command: &'static str,
    pub qa: bool,
}

/// What a matching rule contributes to its target.
#[derive(Debug, Clone)]
pub enum Effect {
    /// The target file exists with exactly this content
    EmitFile { content: &'static str },
    /// The target is a composite; this fragment is appended in rule order
    IncludeFragment { content: &'static str },
    /// Appends a dependency entry to the generated manifest
    AppendDependency(DependencyEntry),
    /// Appends a task entry to the generated task definitions
    AppendTask(TaskEntry),
}

/// A single predicate-to-effect binding. Target paths and emitted contents
/// may contain template expressions rendered against the option set.
#[derive(Debug, Clone)]
pub struct ArtifactRule {
    pub predicate: Predicate,
    pub target: &'static str,
    pub effect: Effect,
}

impl ArtifactRule {
    pub fn emit(predicate: Predicate, target: &'static str, content: &'static str) -> Self {
        Self { predicate, target, effect: Effect::EmitFile { content } }
    }

    pub fn fragment(
        predicate: Predicate,
        target: &'static str,
        content: &'static str,
    ) -> Self {
        Self { predicate, target, effect: Effect::IncludeFragment { content } }
    }

    pub fn dependency(
        predicate: Predicate,
        requirement: &'static str,
        section: DependencySection,
    ) -> Self {
        Self {
            predicate,
            target: crate::resolver::MANIFEST_FILE,
            effect: Effect::AppendDependency(DependencyEntry { requirement, section }),
        }
    }

    pub fn task(
        predicate: Predicate,
        name: &'static str,
        command: &'static str,
        qa: bool,
    ) -> Self {
        Self {
            predicate,
            target: crate::resolver::TASKS_TARGET,
            effect: Effect::AppendTask(TaskEntry { name, command, qa }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;

    fn options(pairs: &[(&str, serde_json::Value)]) -> OptionSet {
        let mut values = IndexMap::new();
        for (key, value) in pairs {
            values.insert(key.to_string(), value.clone());
        }
        OptionSet::from_values(values)
    }

    #[test]
    fn test_predicate_eval() {
        let opts = options(&[
            ("cli", json!(true)),
            ("docker_support", json!(false)),
            ("task_runner", json!("just")),
        ]);

        assert!(Predicate::Always.eval(&opts));
        assert!(Predicate::Truthy("cli").eval(&opts));
        assert!(!Predicate::Truthy("docker_support").eval(&opts));
        assert!(Predicate::Falsy("docker_support").eval(&opts));
        assert!(Predicate::Eq("task_runner", "just").eval(&opts));
        assert!(!Predicate::Eq("task_runner", "pdm").eval(&opts));
        assert!(Predicate::All(vec![
            Predicate::Truthy("cli"),
            Predicate::Eq("task_runner", "just"),
        ])
        .eval(&opts));
        assert!(Predicate::Any(vec![
            Predicate::Truthy("docker_support"),
            Predicate::Truthy("cli"),
        ])
        .eval(&opts));
    }

    #[test]
    fn test_missing_keys_are_falsy() {
        let opts = options(&[]);
        assert!(!Predicate::Truthy("cli").eval(&opts));
        assert!(Predicate::Falsy("cli").eval(&opts));
        assert!(!Predicate::Eq("task_runner", "pdm").eval(&opts));
    }
}
