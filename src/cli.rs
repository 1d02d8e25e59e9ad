//! Command-line interface implementation for gnome-ext.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::TEMPLATES_DIR_ENV;
use crate::create::CreateOptions;
use crate::tasks::DevOptions;
use crate::template::BuildSystem;

/// Command-line arguments structure for gnome-ext.
#[derive(Parser, Debug)]
#[command(
    name = "gnome-ext",
    author,
    version,
    about = "GNOME Shell extension scaffolding and build tool",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new GNOME Shell extension
    Create(CreateArgs),
    /// Build the extension
    Build(BuildArgs),
    /// Package the extension as a zip file
    Pack(ProjectArgs),
    /// Install the extension locally
    Install(ProjectArgs),
    /// Start a development session with a nested GNOME Shell
    Dev(DevArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    /// Name of the extension
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Template to use (basic or indicator)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Skip git initialization
    #[arg(long)]
    pub no_git: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub no_install: bool,

    /// Compile with tsc and shell helpers instead of bundling with esbuild
    #[arg(long)]
    pub no_bundler: bool,

    /// Extension UUID (defaults to gnome-shell-extension-<name>)
    #[arg(long)]
    pub uuid: Option<String>,

    /// Extension description
    #[arg(long)]
    pub description: Option<String>,

    /// Directory where the extension directory will be created
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Accept default answers instead of prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite an existing extension directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Directory holding one template directory per variant
    #[arg(long, value_name = "DIR", env = TEMPLATES_DIR_ENV)]
    pub templates_dir: Option<PathBuf>,
}

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            template: args.template,
            uuid: args.uuid,
            description: args.description,
            build: if args.no_bundler { BuildSystem::Compiler } else { BuildSystem::Bundler },
            init_git: !args.no_git,
            install_deps: !args.no_install,
            assume_defaults: args.yes,
            force: args.force,
            output_dir: args.output_dir,
            templates_dir: args.templates_dir,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ProjectArgs {
    /// Extension project directory
    #[arg(short = 'C', long = "path", value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct BuildArgs {
    /// Watch for changes and rebuild
    #[arg(short, long)]
    pub watch: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(ClapArgs, Debug)]
pub struct DevArgs {
    /// Set display resolution
    #[arg(short, long, default_value = "1920x1080")]
    pub resolution: String,

    /// Watch for changes and rebuild
    #[arg(short, long)]
    pub watch: bool,

    /// Set number of monitors
    #[arg(short, long, default_value_t = 1)]
    pub monitors: u8,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl DevArgs {
    pub fn options(&self) -> DevOptions {
        DevOptions {
            resolution: self.resolution.clone(),
            watch: self.watch,
            monitors: self.monitors,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                println!("{}\n", console::style("GNOME Extension Creator Tool").bold().blue());
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
