//! The default artifact-rule index: every conditional file, fragment,
//! dependency and task of the generated project, declared in aggregation
//! order. Emitted contents and target paths may contain template
//! expressions rendered against the resolved option set.

use crate::rules::{ArtifactRule, DependencySection, Predicate};

const README_HEADER: &str = "\
# {{ project_name }}

{{ project_description }}
";

const README_BADGES: &str = "\
[![Build Status]({{ repository_url }}/actions/workflows/main.yaml/badge.svg)]({{ repository_url }}/actions/workflows/main.yaml)
[![Code Coverage](https://codecov.io/gh/{{ github_account }}/{{ project_slug }}/branch/main/graph/badge.svg)](https://codecov.io/gh/{{ github_account }}/{{ project_slug }})
[![Documentation Status](https://readthedocs.org/projects/{{ project_slug }}/badge/?version=latest)](https://{{ project_slug }}.readthedocs.io/en/latest/)
";

const README_BODY: &str = "\
## Getting started

```shell
{% if task_runner == \"just\" %}pdm install
just qa{% else %}pdm install
pdm run qa{% endif %}
```

## Development

Commits follow the conventional-commits format; `cz commit` walks you
through it.
";

const LICENSE_MIT: &str = "\
MIT License

Copyright (c) {{ author_name }}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

const LICENSE_APACHE: &str = "\
Apache License
Version 2.0, January 2004
http://www.apache.org/licenses/

Copyright {{ author_name }}

Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
";

const LICENSE_PROPRIETARY: &str = "\
Copyright (c) {{ author_name }}. All Rights Reserved.

This software and associated documentation files are proprietary and
confidential. No part of this software may be used, copied, modified,
distributed or disclosed without the prior written permission of the
copyright holder.
";

const MODULE_INIT: &str = "\
\"\"\"{{ project_description }}\"\"\"

__version__ = \"{{ version }}\"
";

const SETTINGS_PYDANTIC: &str = "\
from pydantic import SecretStr
from pydantic_settings import BaseSettings


class Settings(BaseSettings):
    app_name: str = \"{{ project_name }}\"
    debug: bool = False
    secret_key: SecretStr | None = None


settings = Settings()
";

const SETTINGS_TYPED: &str = "\
import typed_settings as ts


@ts.settings
class Settings:
    app_name: str = \"{{ project_name }}\"
    debug: bool = False


settings = ts.load(Settings, appname=\"{{ module_name }}\")
";

const CLI_MAIN: &str = "\
import typer
from rich import print

app = typer.Typer()


@app.command()
def hello(name: str) -> None:
    print(f\"Hello, {name}!\")


if __name__ == \"__main__\":
    app()
";

const TEST_SMOKE: &str = "\
import {{ module_name }}


def test_version() -> None:
    assert {{ module_name }}.__version__
";

const GITIGNORE: &str = "\
__pycache__/
*.py[cod]
.venv/
.pdm-python
dist/
.coverage
htmlcov/
.mypy_cache/
.ruff_cache/
.pytest_cache/
.env
";

const ENV_FILE: &str = "\
# Local environment overrides. Never commit real secrets.
APP_NAME={{ project_name }}
DEBUG=true
SECRET_KEY=
";

const DOCKER_COMPOSE: &str = "\
services:
  {{ project_slug }}:
    build: .
    command: python -m {{ module_name }}
";

const DEPENDABOT: &str = "\
version: 2
updates:
  - package-ecosystem: pip
    directory: \"/\"
    schedule:
      interval: weekly
    automerge: {{ dependabot_automerge }}
";

const WORKFLOW_BASE: &str = "\
name: CI

on:
  push:
    branches: [main]
  pull_request:

jobs:
  qa:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-python@v5
        with:
          python-version: \"{{ python_version }}\"
      - name: Install pdm
        run: pipx install pdm
      - name: Install dependencies
        run: pdm install
{%- if task_runner == \"just\" %}
      - name: Install just
        uses: extractions/setup-just@v2
      - name: Run quality assurance
        run: just qa
{%- else %}
      - name: Run quality assurance
        run: pdm run qa
{%- endif %}";

const WORKFLOW_CODECOV: &str = "\
      - name: Upload coverage
        uses: codecov/codecov-action@v4
        with:
          token: {% raw %}${{ secrets.CODECOV_TOKEN }}{% endraw %}
          files: coverage.xml";

const WORKFLOW_RELEASE: &str = "
  release:
    runs-on: ubuntu-latest
    needs: qa
    if: github.ref == 'refs/heads/main'
    steps:
      - uses: actions/checkout@v4
        with:
          fetch-depth: 0
      - name: Release
        uses: python-semantic-release/python-semantic-release@v9
        with:
          github_token: {% raw %}${{ secrets.GITHUB_TOKEN }}{% endraw %}";

const PRECOMMIT_BASE: &str = "\
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
      - id: check-yaml
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.8.1
    hooks:
      - id: ruff
        args: [--fix]
      - id: ruff-format
  - repo: https://github.com/commitizen-tools/commitizen
    rev: v4.1.0
    hooks:
      - id: commitizen
        stages: [commit-msg]";

const PRECOMMIT_DETECT_SECRETS: &str = "\
  - repo: https://github.com/Yelp/detect-secrets
    rev: v1.5.0
    hooks:
      - id: detect-secrets
        args: [--baseline, .secrets.baseline]
      - id: detect-secrets-baseline";

const ADR_TEMPLATE: &str = "\
# ADR_TITLE_PLACEHOLDER

- Status: proposed
- Date: YYYY-MM-DD

## Context

## Decision

## Consequences
";

const NEW_ADR_SCRIPT: &str = r#"#!/usr/bin/env python
"""Create a numbered ADR from the template in docs/adr."""

import re
import sys
from datetime import date
from pathlib import Path

ADR_DIR = Path("docs/adr")
TEMPLATE = ADR_DIR / "0000-template.md"


def next_number() -> int:
    numbers = [
        int(m.group(1))
        for f in ADR_DIR.glob("*.md")
        if (m := re.match(r"^(\d{4})-", f.name))
    ]
    return max(numbers, default=0) + 1


def slugify(title: str) -> str:
    slug = re.sub(r"[^\w\s-]", "", title.lower())
    slug = re.sub(r"[\s_]+", "-", slug).strip("-")
    return slug or "new-decision"


def main() -> int:
    title = " ".join(sys.argv[1:])
    if not title:
        print("usage: new_adr.py <title>", file=sys.stderr)
        return 1
    number = next_number()
    content = TEMPLATE.read_text(encoding="utf-8")
    content = content.replace("ADR_TITLE_PLACEHOLDER", title)
    content = content.replace("YYYY-MM-DD", date.today().isoformat())
    target = ADR_DIR / f"{number:04d}-{slugify(title)}.md"
    target.write_text(content, encoding="utf-8")
    print(f"Created {target}")
    return 0


if __name__ == "__main__":
    raise SystemExit(main())
"#;

const ROADMAP: &str = "\
# Roadmap

Project board: PROJECT_BOARD_URL_PLACEHOLDER

## Now

## Next

## Later
";

const CODE_OF_CONDUCT: &str = "\
# Code of Conduct

Be respectful. Harassment and exclusionary behavior are not tolerated in
any project space. Report incidents to {{ author_email }}.
";

const SECURITY_POLICY: &str = "\
# Security Policy

Report vulnerabilities privately to {{ author_email }}. Do not open public
issues for security reports. You will receive a response within five
business days.
";

const CITATION: &str = "\
cff-version: 1.2.0
title: \"{{ project_name }}\"
message: If you use this software, please cite it using these metadata.
type: software
authors:
  - name: \"{{ author_name }}\"
version: \"{{ version }}\"
repository-code: \"{{ repository_url }}\"
";

const READTHEDOCS: &str = "\
version: 2
build:
  os: ubuntu-24.04
  tools:
    python: \"{{ python_version }}\"
python:
  install:
    - requirements: docs/requirements.txt
";

/// Builds the default rule index. Rule order defines fragment aggregation
/// order and the order of dependency and task entries.
pub fn template_rules() -> Vec<ArtifactRule> {
    use DependencySection::{Dev, Runtime};
    use Predicate::{Always, Eq, Truthy};

    vec![
        // Package skeleton
        ArtifactRule::emit(Always, "src/{{ module_name }}/__init__.py", MODULE_INIT),
        ArtifactRule::emit(Always, "src/{{ module_name }}/py.typed", ""),
        ArtifactRule::emit(Always, "tests/__init__.py", ""),
        ArtifactRule::emit(Always, "tests/test_smoke.py", TEST_SMOKE),
        ArtifactRule::emit(Always, ".gitignore", GITIGNORE),
        // README is a composite: header, optional badges, body
        ArtifactRule::fragment(Always, "README.md", README_HEADER),
        ArtifactRule::fragment(Truthy("badges"), "README.md", README_BADGES),
        ArtifactRule::fragment(Always, "README.md", README_BODY),
        // Exactly one license variant per option set
        ArtifactRule::emit(Eq("license", "MIT"), "LICENSE.md", LICENSE_MIT),
        ArtifactRule::emit(Eq("license", "Apache-2.0"), "LICENSE.md", LICENSE_APACHE),
        ArtifactRule::emit(Eq("license", "Proprietary"), "LICENSE.md", LICENSE_PROPRIETARY),
        // Settings module: variant selects both path and dependency
        ArtifactRule::emit(
            Eq("config_library", "pydantic-settings"),
            "src/{{ module_name }}/settings.py",
            SETTINGS_PYDANTIC,
        ),
        ArtifactRule::emit(
            Eq("config_library", "typed-settings"),
            "src/{{ module_name }}/config.py",
            SETTINGS_TYPED,
        ),
        ArtifactRule::dependency(Eq("config_library", "pydantic-settings"), "pydantic-settings", Runtime),
        ArtifactRule::dependency(Eq("config_library", "typed-settings"), "typed-settings", Runtime),
        // CLI feature: two dependencies, entry point, source subtree
        ArtifactRule::emit(Truthy("cli"), "src/{{ module_name }}/cli/__init__.py", ""),
        ArtifactRule::emit(Truthy("cli"), "src/{{ module_name }}/cli/__main__.py", CLI_MAIN),
        ArtifactRule::dependency(Truthy("cli"), "typer[all]", Runtime),
        ArtifactRule::dependency(Truthy("cli"), "rich", Runtime),
        // Development dependencies
        ArtifactRule::dependency(Always, "pytest", Dev),
        ArtifactRule::dependency(Always, "pytest-cov", Dev),
        ArtifactRule::dependency(Always, "ruff", Dev),
        ArtifactRule::dependency(Always, "mypy", Dev),
        ArtifactRule::dependency(Always, "pre-commit", Dev),
        ArtifactRule::dependency(Always, "commitizen", Dev),
        ArtifactRule::dependency(Truthy("use_safety"), "safety", Dev),
        ArtifactRule::dependency(Truthy("use_bandit"), "bandit", Dev),
        ArtifactRule::dependency(Truthy("strict_testing"), "typeguard", Dev),
        ArtifactRule::dependency(Truthy("use_semantic_release"), "python-semantic-release", Dev),
        // Tasks; the qa flag controls membership in the composite task and
        // declaration order fixes its ordering
        ArtifactRule::task(Always, "format-check", "ruff format --check .", true),
        ArtifactRule::task(Always, "lint", "ruff check --fix .", true),
        ArtifactRule::task(Always, "type-check", "mypy src tests", true),
        ArtifactRule::task(Always, "test", "pytest", true),
        ArtifactRule::task(Always, "format", "ruff format .", false),
        ArtifactRule::task(Truthy("use_safety"), "safety-check", "safety check", true),
        ArtifactRule::task(Truthy("use_bandit"), "bandit-check", "bandit -r src", true),
        ArtifactRule::task(Truthy("include_adr"), "adr", "python scripts/new_adr.py", false),
        ArtifactRule::task(
            Eq("doc_hosting_provider", "ReadTheDocs"),
            "export-docs-reqs",
            "pdm export --no-hashes -o docs/requirements.txt",
            false,
        ),
        // Structural toggles
        ArtifactRule::emit(Truthy("generate_env"), ".env", ENV_FILE),
        ArtifactRule::emit(Truthy("docker_support"), "docker-compose.yml", DOCKER_COMPOSE),
        ArtifactRule::emit(Truthy("use_dependabot"), ".github/dependabot.yml", DEPENDABOT),
        ArtifactRule::emit(Truthy("include_adr"), "docs/adr/0000-template.md", ADR_TEMPLATE),
        ArtifactRule::emit(Truthy("include_adr"), "scripts/new_adr.py", NEW_ADR_SCRIPT),
        ArtifactRule::emit(Eq("doc_hosting_provider", "ReadTheDocs"), ".readthedocs.yaml", READTHEDOCS),
        // CI workflow composite
        ArtifactRule::fragment(Always, ".github/workflows/main.yaml", WORKFLOW_BASE),
        ArtifactRule::fragment(Truthy("use_codecov"), ".github/workflows/main.yaml", WORKFLOW_CODECOV),
        ArtifactRule::fragment(Truthy("use_semantic_release"), ".github/workflows/main.yaml", WORKFLOW_RELEASE),
        // Pre-commit composite
        ArtifactRule::fragment(Always, ".pre-commit-config.yaml", PRECOMMIT_BASE),
        ArtifactRule::fragment(Truthy("use_detect_secrets"), ".pre-commit-config.yaml", PRECOMMIT_DETECT_SECRETS),
        // Community files and the roadmap placeholder rewritten by bootstrap
        ArtifactRule::emit(Always, "ROADMAP.md", ROADMAP),
        ArtifactRule::emit(Always, "CODE_OF_CONDUCT.md", CODE_OF_CONDUCT),
        ArtifactRule::emit(Always, "SECURITY.md", SECURITY_POLICY),
        ArtifactRule::emit(Always, "CITATION.cff", CITATION),
    ]
}
