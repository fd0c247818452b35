use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use citron::canonical::{canonical_folder_name, should_rename, trigger_tag};
use citron::classifier::classify_folder;
use citron::config::{Config, load_config, resolve_config_path};
use citron::pokedex::{ensure_parent_directory, resolve_pokedex_path};
use citron::prompt::run_interactive;
use citron::report::write_report;
use citron::{CurateError, Curator, CuratorBuilder, NameValidator, Pokedex};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// citron - curates subject-tagged image caption datasets
#[derive(Parser)]
#[command(name = "citron")]
#[command(about = "Normalizes dataset folder names and caption tag files")]
#[command(version)]
struct Cli {
    /// Path to the JSON config file (default: ./config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the pokedex name database
    #[arg(long, global = true, value_name = "PATH")]
    pokedex: Option<PathBuf>,

    /// Disable the folder progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Runs the interactive prompt when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Curate one dataset directory and exit
    Curate(CurateCommand),

    /// Manage the pokedex name database
    #[command(subcommand)]
    Pokedex(PokedexCommand),
}

/// Curate a dataset directory
#[derive(Parser)]
struct CurateCommand {
    /// Directory whose subfolders are dataset folders
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

/// Pokedex maintenance commands
#[derive(Subcommand)]
enum PokedexCommand {
    /// Import names from a text file, one per line
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Add one or more names
    Add {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Show how a folder name would be classified and validated
    Check {
        #[arg(value_name = "FOLDER")]
        folder: String,
    },

    /// Print the number of stored names
    Count,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        None => handle_interactive(&cli),
        Some(Commands::Curate(cmd)) => handle_curate(&cli, cmd),
        Some(Commands::Pokedex(cmd)) => handle_pokedex(&cli, cmd),
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "citron=debug" } else { "citron=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are bad dataset paths and invalid names.
/// Internal errors include database failures and I/O errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    if let Some(curate_error) = error.downcast_ref::<CurateError>() {
        return curate_error.is_user_error();
    }
    error.to_string().contains("cannot be empty")
}

fn load(cli: &Cli) -> Config {
    let config_path = resolve_config_path(cli.config.as_deref());
    load_config(&config_path)
}

fn open_pokedex(cli: &Cli, config: &Config) -> Result<Pokedex> {
    let path = resolve_pokedex_path(cli.pokedex.as_deref(), config.pokedex_path.as_deref())?;
    ensure_parent_directory(&path)?;
    Pokedex::open(&path).context("Failed to open pokedex")
}

fn build_curator(cli: &Cli) -> Result<Curator> {
    let config = load(cli);
    let pokedex = open_pokedex(cli, &config)?;
    if pokedex.count()? == 0 {
        warn!("pokedex is empty, every folder will be reported as not in database");
    }

    Ok(CuratorBuilder::new()
        .absorb(config.absorb_set())
        .validator(pokedex)
        .progress(!cli.no_progress)
        .build())
}

/// Runs the interactive prompt on stdin/stdout.
fn handle_interactive(cli: &Cli) -> Result<()> {
    let curator = build_curator(cli)?;
    let stdin = io::stdin();
    run_interactive(stdin.lock(), &mut io::stdout(), &curator)?;
    Ok(())
}

/// Handles the curate command.
fn handle_curate(cli: &Cli, cmd: &CurateCommand) -> Result<()> {
    let curator = build_curator(cli)?;
    let report = curator.curate(&cmd.dir)?;
    if report.folders_found > 0 {
        println!("Found {} dataset folders.", report.folders_found);
    }
    write_report(&mut io::stdout().lock(), &report)?;
    Ok(())
}

/// Handles the pokedex subcommands.
fn handle_pokedex(cli: &Cli, cmd: &PokedexCommand) -> Result<()> {
    let config = load(cli);
    let pokedex = open_pokedex(cli, &config)?;

    match cmd {
        PokedexCommand::Import { file } => {
            let inserted = pokedex.import_file(file)?;
            println!(
                "Imported {} new name(s) ({} total)",
                inserted,
                pokedex.count()?
            );
        }
        PokedexCommand::Add { names } => {
            for name in names {
                if pokedex.insert(name)? {
                    println!("Added {}", name.trim());
                } else {
                    println!("{} is already present", name.trim());
                }
            }
        }
        PokedexCommand::Check { folder } => print_check(folder, &pokedex),
        PokedexCommand::Count => println!("{}", pokedex.count()?),
    }

    Ok(())
}

/// Prints how a folder name classifies, validates, and would be renamed.
fn print_check(folder: &str, validator: &dyn NameValidator) {
    let Some(classified) = classify_folder(folder) else {
        println!("{folder}: unrecognized format");
        return;
    };

    let subject = &classified.subject;
    let known = validator.is_known(&subject.capitalized());
    println!("Folder:    {folder}");
    println!("Format:    {}", classified.format);
    println!("Subject:   {subject}");
    println!(
        "Database:  {}",
        if known { "known" } else { "not in database" }
    );
    println!("Trigger:   {}", trigger_tag(subject));
    if should_rename(folder, subject) {
        println!("Rename to: {}", canonical_folder_name(subject));
    } else {
        println!("Rename to: (already canonical)");
    }
}
