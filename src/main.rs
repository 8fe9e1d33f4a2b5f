//! wikimyst - Convert exported wiki spaces to MyST Markdown

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use wikimyst::{Config, Converter};

#[derive(Parser)]
#[command(name = "wikimyst")]
#[command(version, about = "Convert exported wiki spaces to MyST Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    wikimyst export/DOCS site/source/DOCS            Convert a space
    wikimyst export/DOCS out --clean --title Docs    Start from an empty output
    wikimyst export/DOCS out --dump-toc              Print the navigation tree

Set RUST_LOG=info (or debug) for detailed logs.")]
struct Cli {
    /// Exported space directory
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "DEST")]
    destination: Option<PathBuf>,

    /// Space index page (default: SOURCE/index.html)
    #[arg(long, value_name = "PATH")]
    index: Option<PathBuf>,

    /// Title of the generated index.rst (default: SOURCE directory name)
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// JSON settings file; command-line values take precedence
    #[arg(long, value_name = "FILE.json")]
    config: Option<PathBuf>,

    /// Remove DEST before converting
    #[arg(long)]
    clean: bool,

    /// Print the navigation tree as JSON and exit
    #[arg(long)]
    dump_toc: bool,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> wikimyst::Result<ExitCode> {
    let config = build_config(&cli)?;
    let converter = Converter::new(config)?;

    if cli.dump_toc {
        println!("{}", converter.toc().to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    let report = converter.run()?;

    if !cli.quiet {
        println!("HTML to Markdown conversion completed.");
        println!(
            "{} pages, {} assets, {} skipped",
            report.pages, report.assets, report.skipped
        );
    }
    let summary = format!("{} Errors.", report.errors());
    if report.is_success() {
        println!("{}", summary.green());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", summary.red());
        for failure in &report.failures {
            eprintln!("  {} {}", failure.path.display(), failure.message);
        }
        Ok(ExitCode::FAILURE)
    }
}

/// Config file first, then command-line overrides.
fn build_config(cli: &Cli) -> wikimyst::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(destination) = &cli.destination {
        config.destination = destination.clone();
    }
    if cli.index.is_some() {
        config.index = cli.index.clone();
    }
    if cli.title.is_some() {
        config.title = cli.title.clone();
    }
    config.clean |= cli.clean;
    config.quiet |= cli.quiet;

    Ok(config)
}
