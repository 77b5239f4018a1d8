//! Charm-style CLI prompts using cliclack

use crate::config::Config;
use crate::options::Directives;
use crate::pipeline;
use crate::project::{self, Published};
use crate::prompt::{NonInteractive, Prompter};
use crate::report::{Note, Severity};
use crate::sources::{self, FileRequest};
use crate::vcs::GitCli;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Arguments for the `new` command
#[derive(Debug, Clone, Default)]
pub struct NewArgs {
    /// Project name; also the directory and package name
    pub name: String,

    /// Directory to create the project in (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Explicit config file; must exist when given
    pub file: Option<PathBuf>,

    /// Skip the config file entirely
    pub ignore_config: bool,

    /// Command-line opinions about the configuration
    pub directives: Directives,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Prompts rendered with cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let answer: bool = cliclack::confirm(question)
            .initial_value(default)
            .interact()?;
        Ok(answer)
    }

    fn input(&mut self, question: &str, suggestion: Option<&str>) -> Result<String> {
        let mut input = cliclack::input(question);
        if let Some(suggestion) = suggestion {
            input = input.placeholder(suggestion).default_input(suggestion);
        }
        let answer: String = input.interact()?;
        Ok(answer)
    }
}

/// Run the `new` command with interactive prompts
pub async fn run(args: NewArgs) -> Result<()> {
    cliclack::intro("hsproj")?;

    // Step 1: Command-line input is checked before anything is read
    project::validate_name(&args.name)?;
    let cli = args.directives.clone().into_partial()?;

    // Step 2: Gather the remaining sources
    let request = FileRequest::new(args.file.clone(), args.ignore_config);
    let gathered = sources::gather(&request, &sources::home_config_path, &GitCli, cli)?;
    log_notes(&gathered.notes)?;

    // Step 3: Merge and finalize
    let config = if args.yes {
        cliclack::log::info("Non-interactive mode: undecided options take their defaults")?;
        pipeline::resolve(&gathered.partials(), &mut NonInteractive)?
    } else {
        pipeline::resolve(&gathered.partials(), &mut ClackPrompter)?
    };
    log_summary(&config)?;

    // Step 4: Write the project
    let parent = select_parent(&args)?;
    let project_dir = create_project(&parent, &args.name, &config).await?;

    // Step 5: Version control
    publish(&project_dir, &args.name, &config)?;

    // Step 6: Show next steps
    print_next_steps(&project_dir, &config)?;

    Ok(())
}

fn log_notes(notes: &[Note]) -> Result<()> {
    for note in notes {
        match note.severity {
            Severity::Info => cliclack::log::info(&note.message)?,
            Severity::Warning => cliclack::log::warning(&note.message)?,
            Severity::Error => cliclack::log::error(&note.message)?,
        }
    }
    Ok(())
}

fn log_summary(config: &Config) -> Result<()> {
    let tools: Vec<&str> = [(config.cabal, "cabal"), (config.stack, "stack")]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
    let targets: Vec<&str> = [
        (config.lib, "library"),
        (config.exe, "executable"),
        (config.test, "tests"),
        (config.bench, "benchmarks"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    let versions: Vec<String> = config.ghc_versions.iter().map(|v| v.to_string()).collect();

    cliclack::log::success(format!(
        "{} <{}> as {}, license {}\nBuild tools: {}\nTargets: {}\nGHC: {}",
        config.full_name,
        config.email,
        config.owner,
        config.license,
        tools.join(", "),
        targets.join(", "),
        versions.join(", ")
    ))?;
    Ok(())
}

fn select_parent(args: &NewArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }
    Ok(path)
}

async fn create_project(parent: &Path, name: &str, config: &Config) -> Result<PathBuf> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match project::materialize(parent, name, config).await {
        Ok((dir, written)) => {
            spinner.stop(format!("Created {} files in {}", written.len(), dir.display()));
            Ok(dir)
        }
        Err(e) => {
            spinner.stop("Project was not created");
            Err(e)
        }
    }
}

fn publish(dir: &Path, name: &str, config: &Config) -> Result<()> {
    if !config.github {
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start(if config.upload() {
        "Creating GitHub repository..."
    } else {
        "Committing..."
    });

    match project::publish(&GitCli, dir, name, config) {
        Ok(Published::Pushed { slug }) => {
            spinner.stop(format!("Pushed to https://github.com/{}", slug));
        }
        Ok(Published::Committed) => {
            spinner.stop("Committed locally (upload disabled)");
        }
        Ok(Published::Skipped) => {
            spinner.stop("Skipped version control");
        }
        Err(e) => {
            spinner.stop("Version control step failed");
            cliclack::log::warning(format!("{:#}", e))?;
        }
    }
    Ok(())
}

fn print_next_steps(project_dir: &Path, config: &Config) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }
    if config.cabal {
        steps.push("cabal build".to_string());
    }
    if config.stack {
        steps.push("stack build".to_string());
    }

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
