//! Armature's main application entry point and orchestration logic.
//! Handles command-line argument parsing, option resolution, artifact
//! resolution and rendering, and the post-generation bootstrap.

use std::path::PathBuf;

use armature::{
    bootstrap::{bootstrap, GhCli},
    catalog::template_rules,
    cli::{get_args, parse_data_overrides, Args},
    config::get_schema,
    error::{default_error_handler, Error, Result},
    hooks::{confirm_hook_execution, get_hook_files, run_hook},
    ignore::parse_ignore_file,
    parser::{get_answers, get_answers_from, load_from_hook, merge_answers},
    processor::{ensure_output_dir, Processor},
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    resolver::resolve,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Validates that the template argument points at an existing directory.
fn load_template(template: &str) -> Result<PathBuf> {
    let path = PathBuf::from(template);
    if !path.exists() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: path.display().to_string(),
        });
    }
    Ok(path)
}

/// Main application logic execution.
///
/// # Flow
/// 1. Validates the output directory and template source
/// 2. Loads the option schema (template-defined or built-in)
/// 3. Collects answers: pre-hook output, stdin, -d overrides, prompting
/// 4. Resolves the option set and the artifact manifest
/// 5. Renders the template tree and materializes the manifest
/// 6. Executes the post-generation hook and bootstrap steps
fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();
    let prompter = DialoguerPrompter::new();

    let output_root = ensure_output_dir(&args.output_dir, args.force)?;
    let template_root = load_template(&args.template)?;
    let schema = get_schema(&template_root)?;

    let execute_hooks =
        confirm_hook_execution(&prompter, &template_root, args.skip_hooks_check)?;
    let (pre_hook_file, post_hook_file) = get_hook_files(&template_root);

    // Answer precedence: pre-hook output, then stdin, then -d overrides.
    let mut preloaded = get_answers_from(args.stdin)?;
    preloaded = merge_answers(&preloaded, &parse_data_overrides(&args.data)?);

    if execute_hooks && pre_hook_file.exists() {
        let stdout =
            run_hook(&template_root, &output_root, &pre_hook_file, &preloaded, true)?;
        if let Some(stdout) = stdout {
            preloaded = merge_answers(&load_from_hook(stdout)?, &preloaded);
        }
    }

    let answers = get_answers(&engine, &prompter, &schema, &preloaded, args.defaults)?;
    let options = schema.resolve(&answers, &engine)?;

    let ignored = parse_ignore_file(&template_root)?;
    let rules = template_rules();
    let manifest = resolve(&options, &rules)?;

    let processor =
        Processor::new(&engine, &template_root, &output_root, &options, &ignored);
    let written = processor.run(&manifest)?;
    for path in &written {
        println!("created: '{}'", path.display());
    }

    if execute_hooks && post_hook_file.exists() {
        run_hook(
            &template_root,
            &output_root,
            &post_hook_file,
            &options.as_context(),
            false,
        )?;
    }

    if !args.skip_tasks {
        bootstrap(&options, &output_root, &GhCli)?;
    }

    println!("Project generation completed successfully in {}.", output_root.display());
    Ok(())
}
