//! gnome-ext's main application entry point.
//! Parses the command line and dispatches to the requested command.

use gnome_ext::{
    cli::{get_args, Args, Commands},
    create::{print_outcome, run_create, Services},
    error::{default_error_handler, Result},
    finalize::{GitVersionControl, NpmPackageManager},
    logger::init_logger,
    process::SystemRunner,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    tasks,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let runner = SystemRunner;
    match args.command {
        Commands::Create(create_args) => {
            let prompt = DialoguerPrompter::new();
            let renderer = MiniJinjaRenderer::new();
            let packages = NpmPackageManager::new("npm", &runner);
            let services = Services {
                prompt: &prompt,
                renderer: &renderer,
                vcs: &GitVersionControl,
                packages: &packages,
            };
            let outcome = run_create(&create_args.into(), &services)?;
            print_outcome(&outcome);
        }
        Commands::Build(build_args) => {
            tasks::build(&build_args.project.project_dir, build_args.watch, &runner)?;
        }
        Commands::Pack(project) => {
            tasks::pack(&project.project_dir, &runner)?;
        }
        Commands::Install(project) => {
            tasks::install(&project.project_dir, &runner)?;
        }
        Commands::Dev(dev_args) => {
            tasks::dev(&dev_args.project.project_dir, &dev_args.options(), &runner)?;
        }
    }
    Ok(())
}
