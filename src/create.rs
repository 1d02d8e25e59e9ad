//! The `create` command: derive, resolve, check for conflicts, materialize, finalize.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{self, ExtensionConfig};
use crate::conflict::{check_conflict, Resolution};
use crate::error::{Error, Result, Stage};
use crate::finalize::{finalize, FinalizeReport, PackageManager, VersionControl};
use crate::generators::Scaffold;
use crate::output;
use crate::processor::{materialize, MaterializedTree};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::template::{resolve_template, templates_root, BuildSystem, Variant};

/// Answers and switches for one `create` run.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub name: Option<String>,
    pub template: Option<String>,
    pub uuid: Option<String>,
    pub description: Option<String>,
    pub build: BuildSystem,
    pub init_git: bool,
    pub install_deps: bool,
    /// Accept defaults instead of prompting.
    pub assume_defaults: bool,
    /// Overwrite an existing project directory without asking.
    pub force: bool,
    /// Directory the project directory is created in.
    pub output_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            name: None,
            template: None,
            uuid: None,
            description: None,
            build: BuildSystem::Bundler,
            init_git: true,
            install_deps: true,
            assume_defaults: false,
            force: false,
            output_dir: PathBuf::from("."),
            templates_dir: None,
        }
    }
}

/// Collaborators the pipeline talks to.
pub struct Services<'a> {
    pub prompt: &'a dyn Prompter,
    pub renderer: &'a dyn TemplateRenderer,
    pub vcs: &'a dyn VersionControl,
    pub packages: &'a dyn PackageManager,
}

/// What a `create` run ended with.
#[derive(Debug)]
pub enum CreateOutcome {
    Created { tree: MaterializedTree, report: FinalizeReport },
    Cancelled { target: PathBuf },
}

/// Asks for the name until a valid one is given.
fn ask_name(prompt: &dyn Prompter) -> Result<String> {
    loop {
        let answer = prompt.input("What is the name of your extension?".to_string(), None)?;
        match config::validate_name(&answer) {
            Ok(()) => return Ok(answer),
            Err(e) => output::warning(&e.to_string()),
        }
    }
}

fn ask_or_default(
    prompt: &dyn Prompter,
    given: Option<&String>,
    assume_defaults: bool,
    question: &str,
    default: String,
) -> Result<String> {
    match given {
        Some(value) => Ok(value.clone()),
        None if assume_defaults => Ok(default),
        None => prompt.input(question.to_string(), Some(default)),
    }
}

fn ask_variant(prompt: &dyn Prompter, options: &CreateOptions) -> Result<String> {
    if let Some(template) = &options.template {
        return Ok(template.clone());
    }
    if options.assume_defaults {
        return Ok(Variant::Basic.to_string());
    }
    let items: Vec<&str> = Variant::ALL.iter().map(|v| v.as_str()).collect();
    let index = prompt.select("Template:".to_string(), &items, 0)?;
    Ok(items[index].to_string())
}

/// Collects the answers and derives the extension identity.
fn gather(prompt: &dyn Prompter, options: &CreateOptions) -> Result<(ExtensionConfig, String)> {
    let name = match &options.name {
        Some(name) => {
            config::validate_name(name)?;
            name.clone()
        }
        None if options.assume_defaults => {
            return Err(Error::ValidationError(
                "Name is required when prompts are disabled".to_string(),
            ));
        }
        None => ask_name(prompt)?,
    };

    let dir_name = config::dir_name(&name);
    let uuid = ask_or_default(
        prompt,
        options.uuid.as_ref(),
        options.assume_defaults,
        "Extension UUID (e.g., domain.user.name):",
        config::default_uuid(&dir_name),
    )?;
    let description = ask_or_default(
        prompt,
        options.description.as_ref(),
        options.assume_defaults,
        "Description:",
        config::default_description(&name),
    )?;
    let variant = ask_variant(prompt, options)?;

    let config = ExtensionConfig::derive(&name, Some(uuid.as_str()), Some(description.as_str()))?;
    Ok((config, variant))
}

/// Runs the whole creation pipeline.
///
/// The template is resolved and the conflict settled before anything is
/// written. Failures of the optional steps end up in the report only.
pub fn run_create(options: &CreateOptions, services: &Services) -> Result<CreateOutcome> {
    let (config, requested) =
        gather(services.prompt, options).map_err(|e| e.during(Stage::Derive))?;
    debug!("Derived {:?}", config);

    let root = templates_root(options.templates_dir.as_deref());
    let handle =
        resolve_template(root.as_deref(), &requested).map_err(|e| e.during(Stage::Resolve))?;

    let target = options.output_dir.join(&config.dir_name);
    output::info(&format!("\nCreating extension in {}", display_path(&target)));

    let resolution = check_conflict(services.prompt, &target, options.force)
        .map_err(|e| e.during(Stage::Conflict))?;
    if resolution == Resolution::Cancel {
        return Ok(CreateOutcome::Cancelled { target });
    }

    let scaffold = Scaffold { config: &config, variant: handle.variant, build: options.build };
    let tree = materialize(&target, &handle, &scaffold, services.renderer)
        .map_err(|e| e.during(Stage::Materialize))?;

    let report = finalize(
        &target,
        options.init_git,
        options.install_deps,
        services.vcs,
        services.packages,
    );

    Ok(CreateOutcome::Created { tree, report })
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()).display().to_string()
}

/// Prints the closing message for a run.
pub fn print_outcome(outcome: &CreateOutcome) {
    match outcome {
        CreateOutcome::Cancelled { .. } => {
            output::warning("Extension creation cancelled.");
        }
        CreateOutcome::Created { tree, .. } => {
            output::success("\nExtension created successfully!");
            output::header("Next steps:");
            let dir_name = tree
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            output::line(&format!("1. cd {dir_name}"));
            output::line("2. npm run build");
            output::line("3. npm run install-extension");
            output::line("4. npm run dev");
        }
    }
}
