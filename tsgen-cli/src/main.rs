//! # tsgen
//!
//! CLI tool for generating TypeScript interfaces and classes from PHP classes.
//!
//! ## Usage
//!
//! ```bash
//! # Generate one interface per class
//! tsgen interface src/Entity assets/models
//!
//! # Generate classes instead
//! tsgen class src/Entity assets/models
//!
//! # Watch mode for development
//! tsgen interface src/Entity assets/models --watch
//!
//! # Dry run to preview output
//! tsgen interface src/Entity assets/models --dry-run
//!
//! # Print the class definitions as JSON
//! tsgen inspect src/Entity
//!
//! # Initialize configuration
//! tsgen init
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use tsgen::ClassDefinition;
use tsgen_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::CliError,
    generator::{GenerationReport, TypeScriptGenerator},
    renderer::TemplateKind,
    watcher::FileWatcher,
    writer::WriteResult,
};

#[derive(Parser)]
#[command(name = "tsgen")]
#[command(author, version, about = "Generate TypeScript interfaces and classes from PHP classes", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one TypeScript interface per PHP class
    Interface(GenerateArgs),

    /// Generate one TypeScript class per PHP class
    Class(GenerateArgs),

    /// Print the class definitions found under a directory as JSON
    Inspect {
        /// Directory containing PHP source files
        input: PathBuf,

        /// Filter sources by relative path pattern (glob)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Initialize a new tsgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Directory containing PHP source files
    input: PathBuf,

    /// Directory receiving the generated files
    output: PathBuf,

    /// Watch for file changes and regenerate
    #[arg(short, long)]
    watch: bool,

    /// Preview output without writing files
    #[arg(long)]
    dry_run: bool,

    /// Filter sources by relative path pattern (glob)
    #[arg(long)]
    filter: Option<String>,

    /// Extension of generated files
    #[arg(long)]
    extension: Option<String>,

    /// Module path prefix used in import statements
    #[arg(long)]
    import_prefix: Option<String>,

    /// Skip classes whose metadata cannot be read instead of aborting
    #[arg(long)]
    skip_failed: bool,
}

#[derive(Serialize)]
struct InspectedClass<'a> {
    fqcn: &'a str,
    #[serde(flatten)]
    definition: &'a ClassDefinition,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            if e.is_invalid_input() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Interface(args) => cmd_generate(TemplateKind::Interface, args, cli.config),
        Commands::Class(args) => cmd_generate(TemplateKind::Class, args, cli.config),
        Commands::Inspect { input, filter } => cmd_inspect(input, filter, cli.config),
        Commands::Init { output, force } => cmd_init(output, force),
    }
}

/// Generate command implementation.
fn cmd_generate(
    kind: TemplateKind,
    args: GenerateArgs,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            extension: args.extension.clone(),
            import_prefix: args.import_prefix.clone(),
            skip_failed_classes: args.skip_failed.then_some(true),
        },
    );
    ConfigManager::validate(&config)?;

    let generator = TypeScriptGenerator::new(config, kind)
        .with_filter(args.filter.clone())
        .with_dry_run(args.dry_run);

    if args.watch {
        run_watch_mode(&generator, &args.input, &args.output)
    } else {
        run_generate(&generator, &args.input, &args.output)
    }
}

/// Run generation once and print a summary.
fn run_generate(
    generator: &TypeScriptGenerator,
    input: &Path,
    output: &Path,
) -> Result<(), CliError> {
    println!(
        "{} {} from {}",
        "Generating".cyan(),
        format!("{}s", generator.kind()).cyan(),
        input.display()
    );

    let report = generator.generate(input, output)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &GenerationReport) {
    for declaration in &report.declarations {
        match &declaration.result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "  {} {} ({} bytes)",
                    "✓".green(),
                    path.display(),
                    bytes
                );
            }
            WriteResult::DryRun { content, path } => {
                println!("{} Would write to {}:", "[dry-run]".yellow(), path.display());
                println!("{}", "─".repeat(60).dimmed());
                print!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    for collision in &report.collisions {
        println!(
            "  {} {} overwrote {} ({})",
            "Warning:".yellow(),
            collision.kept,
            collision.overwritten,
            collision.name
        );
    }

    for skipped in &report.skipped {
        println!(
            "  {} skipped {}: {}",
            "Warning:".yellow(),
            skipped.name,
            skipped.reason
        );
    }

    if report.declarations.is_empty() {
        println!("{}", "No PHP classes found.".yellow());
    } else if report.written_count() == 0 {
        println!(
            "  Previewed {} declaration(s)",
            report.declarations.len().to_string().green()
        );
    } else {
        println!(
            "  Generated {} declaration(s), {} bytes written",
            report.written_count().to_string().green(),
            report.bytes_written()
        );
    }
}

/// Run in watch mode.
fn run_watch_mode(
    generator: &TypeScriptGenerator,
    input: &Path,
    output: &Path,
) -> Result<(), CliError> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", input.display());
    println!("  Press Ctrl+C to stop\n");

    run_generate(generator, input, output)?;

    let watcher = FileWatcher::new(input);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if let Some(message) = event.error_message() {
            println!("{} {}", "Watch error:".red(), message);
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(generator, input, output) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Inspect command implementation.
fn cmd_inspect(
    input: PathBuf,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config: Config = ConfigManager::load(config_path.as_deref())?;
    let generator = TypeScriptGenerator::new(config, TemplateKind::Interface).with_filter(filter);

    let definitions = generator.definitions(&input)?;
    let inspected: Vec<InspectedClass<'_>> = definitions
        .iter()
        .map(|(fqcn, definition)| InspectedClass { fqcn, definition })
        .collect();

    println!("{}", serde_json::to_string_pretty(&inspected)?);
    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Configuration file already exists: {}", output.display()),
        )
        .into());
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
