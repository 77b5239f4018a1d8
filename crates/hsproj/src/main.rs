//! hsproj - Scaffolding for ready-to-build Haskell projects

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use hsproj_core::config::{GhcVersion, License, Target};
use hsproj_core::options::{Directives, Toggle};
use hsproj_core::sources::{self, FileRequest};
use hsproj_core::tui::NewArgs;
use hsproj_core::vcs::GitCli;
use hsproj_core::{pipeline, report, PartialConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hsproj")]
#[command(about = "CLI for scaffolding ready-to-build Haskell projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    New(NewCmd),
    /// Print the merged configuration from defaults, git identity and the config file
    ShowConfig(ConfigFileArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ConfigFileArgs {
    /// Configuration file to read instead of ~/.hsproj.toml
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Do not read any configuration file
    #[arg(long = "ignore-config")]
    pub ignore_config: bool,
}

#[derive(ClapArgs, Debug)]
pub struct NewCmd {
    /// Project name
    pub name: String,

    #[command(flatten)]
    pub config_file: ConfigFileArgs,

    /// Directory to create the project in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Work offline: no upload and license NONE
    #[arg(long)]
    pub offline: bool,

    /// Do not create or push a remote repository
    #[arg(long = "no-upload")]
    pub no_upload: bool,

    /// Use cabal
    #[arg(long)]
    pub cabal: bool,

    /// Do not use cabal
    #[arg(long = "no-cabal")]
    pub no_cabal: bool,

    /// Use stack
    #[arg(long)]
    pub stack: bool,

    /// Do not use stack
    #[arg(long = "no-stack")]
    pub no_stack: bool,

    /// Targets to enable (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub on: Vec<Target>,

    /// Targets to disable (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub off: Vec<Target>,

    /// License of the project
    #[arg(short, long, value_enum)]
    pub license: Option<License>,

    /// Additional GHC versions to test with (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ghc: Vec<GhcVersion>,

    /// Default extensions (comma-separated)
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Package providing a custom prelude
    #[arg(long = "prelude-package")]
    pub prelude_package: Option<String>,

    /// Module to import as Prelude
    #[arg(long = "prelude-module")]
    pub prelude_module: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<NewCmd> for NewArgs {
    fn from(cmd: NewCmd) -> Self {
        NewArgs {
            name: cmd.name,
            directory: cmd.directory,
            file: cmd.config_file.file,
            ignore_config: cmd.config_file.ignore_config,
            directives: Directives {
                enable: cmd.on,
                disable: cmd.off,
                cabal: Toggle {
                    on: cmd.cabal,
                    off: cmd.no_cabal,
                },
                stack: Toggle {
                    on: cmd.stack,
                    off: cmd.no_stack,
                },
                license: cmd.license,
                ghc_versions: cmd.ghc,
                extensions: cmd.extensions,
                prelude_package: cmd.prelude_package,
                prelude_module: cmd.prelude_module,
                offline: cmd.offline,
                no_upload: cmd.no_upload,
            },
            yes: cmd.yes,
        }
    }
}

fn show_config(args: ConfigFileArgs) -> Result<()> {
    let request = FileRequest::new(args.file, args.ignore_config);
    let gathered = sources::gather(
        &request,
        &sources::home_config_path,
        &GitCli,
        PartialConfig::empty(),
    )?;
    report::print_notes(&gathered.notes);
    print!("{}", pipeline::describe(&gathered.merged())?);
    Ok(())
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = match args.command {
        Command::New(cmd) => {
            let result = hsproj_core::run(cmd.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Command::ShowConfig(file_args) => show_config(file_args),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
