use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use wikimyst::dom::parse_html;
use wikimyst::markdown::{Transcoder, UrlFilter};
use wikimyst::{Error, RenameTable, decode_text};

/// Convert a single exported page to Markdown on stdout
#[derive(Parser, Debug)]
#[command(name = "wikimyst-page")]
#[command(about = "Converts one exported wiki page to MyST Markdown and prints it")]
struct Args {
    /// HTML page to convert
    file: PathBuf,

    /// Space index used to rename links between pages
    #[arg(short, long, value_name = "PATH")]
    index: Option<PathBuf>,

    /// Print every emitted link and image reference after the page
    #[arg(short, long)]
    refs: bool,
}

fn read_html(path: &Path) -> wikimyst::Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(decode_text(&bytes, None).into_owned())
}

fn run(args: &Args) -> wikimyst::Result<()> {
    let table = match &args.index {
        Some(index) => RenameTable::from_index(&parse_html(&read_html(index)?)),
        None => RenameTable::new(),
    };
    let filter = UrlFilter::default();

    let document = Transcoder::new(&table, &filter).convert(&read_html(&args.file)?);
    println!("{}", document.to_markdown());

    if args.refs {
        eprintln!("{}", "References:".bold());
        for reference in &document.emitted {
            eprintln!("  {reference}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
