//! Whole-space conversion.
//!
//! A [`Converter`] reads the space index once, then mirrors the source tree
//! into the destination: pages become Markdown, attachments are copied, and
//! everything else is skipped.
//!
//! # Example
//!
//! ```no_run
//! use wikimyst::config::Config;
//! use wikimyst::export::Converter;
//!
//! let config = Config::new("export/DOCS", "site/source/DOCS");
//! let report = Converter::new(config)?.run()?;
//! println!("{} pages, {} errors", report.pages, report.errors());
//! # Ok::<(), wikimyst::Error>(())
//! ```
//!
//! One bad file never stops a run: I/O errors and panics raised while
//! converting a file are recorded in the [`RunReport`] and the walk goes on.

mod nav;

pub use nav::{render_child_toctree, render_index};

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::config::{Config, INDEX_RST_NAME};
use crate::dom::parse_html;
use crate::error::{Error, Result};
use crate::markdown::{HTML_EXT, Transcoder};
use crate::rename::RenameTable;
use crate::toc::TocTree;
use crate::util::decode_text;

/// A file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Path relative to the source root.
    pub path: PathBuf,
    pub message: String,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub pages: usize,
    pub assets: usize,
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn errors(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files visited, failed ones included.
    pub fn processed(&self) -> usize {
        self.pages + self.assets + self.skipped + self.failures.len()
    }
}

/// What happened to one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Page,
    Asset,
    Skipped,
}

/// Converts one exported space.
#[derive(Debug)]
pub struct Converter {
    config: Config,
    table: RenameTable,
    toc: TocTree,
}

impl Converter {
    /// Validate the config and load the space index.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let index_path = config.index_path();
        let bytes = fs::read(&index_path).map_err(|e| Error::io(&index_path, e))?;
        let html = decode_text(&bytes, config.encoding.as_deref());
        let dom = parse_html(&html);

        let table = RenameTable::from_index(&dom);
        let toc = TocTree::from_index(&dom);
        tracing::info!(
            index = %index_path.display(),
            pages = table.len(),
            roots = toc.roots().len(),
            "loaded space index"
        );

        Ok(Self { config, table, toc })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &RenameTable {
        &self.table
    }

    pub fn toc(&self) -> &TocTree {
        &self.toc
    }

    /// Convert the whole source tree.
    pub fn run(&self) -> Result<RunReport> {
        let _span =
            tracing::info_span!("convert", source = %self.config.source.display()).entered();

        self.prepare_destination()?;

        let index_rst = self.config.destination.join(INDEX_RST_NAME);
        fs::write(
            &index_rst,
            render_index(&self.toc, &self.config.index_title()),
        )
        .map_err(|e| Error::io(&index_rst, e))?;

        let mut report = RunReport::default();

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.config.source).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    self.record_failure(&mut report, path, &Error::Walk(e));
                }
            }
        }

        let progress = self.progress_bar(files.len() as u64);
        for path in &files {
            let relative = path.strip_prefix(&self.config.source).unwrap_or(path);
            progress.set_message(relative.display().to_string());

            let result =
                panic::catch_unwind(AssertUnwindSafe(|| self.convert_file(path, relative)))
                    .unwrap_or_else(|payload| Err(Error::Panic(panic_message(payload.as_ref()))));

            match result {
                Ok(FileOutcome::Page) => report.pages += 1,
                Ok(FileOutcome::Asset) => report.assets += 1,
                Ok(FileOutcome::Skipped) => report.skipped += 1,
                Err(e) => self.record_failure(&mut report, relative.to_path_buf(), &e),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        tracing::info!(
            pages = report.pages,
            assets = report.assets,
            skipped = report.skipped,
            errors = report.errors(),
            "conversion finished"
        );
        Ok(report)
    }

    fn prepare_destination(&self) -> Result<()> {
        let destination = &self.config.destination;
        if self.config.clean && destination.exists() {
            tracing::info!(path = %destination.display(), "removing previous output");
            fs::remove_dir_all(destination).map_err(|e| Error::io(destination, e))?;
        }
        fs::create_dir_all(destination).map_err(|e| Error::io(destination, e))
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if self.config.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{pos}/{len}] {bar:40.cyan/blue} {wide_msg}")
                .unwrap_or_else(|e| {
                    tracing::warn!("Progress template error: {}, using default", e);
                    ProgressStyle::default_bar()
                }),
        );
        pb
    }

    fn record_failure(&self, report: &mut RunReport, path: PathBuf, error: &Error) {
        tracing::error!(path = %path.display(), error = %error, "failed to convert file");
        report.failures.push(FileFailure {
            path,
            message: error.to_string(),
        });
    }

    fn convert_file(&self, path: &Path, relative: &Path) -> Result<FileOutcome> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target_dir = match relative.parent() {
            Some(parent) => self.config.destination.join(parent),
            None => self.config.destination.clone(),
        };

        if file_name.ends_with(HTML_EXT) {
            let _span = tracing::debug_span!("page", file = %file_name).entered();
            let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
            let html = decode_text(&bytes, self.config.encoding.as_deref());

            let transcoder = Transcoder::new(&self.table, &self.config.url_filter);
            let mut markdown = transcoder.convert(&html).to_markdown();

            let output_name = self.table.resolve(&file_name);
            if let Some(filename) = self.table.get(&file_name)
                && let Some(toctree) = render_child_toctree(&self.toc, filename)
            {
                markdown.push_str(&toctree);
            }

            fs::create_dir_all(&target_dir).map_err(|e| Error::io(&target_dir, e))?;
            let output = target_dir.join(&output_name);
            fs::write(&output, markdown).map_err(|e| Error::io(&output, e))?;
            tracing::debug!(output = %output.display(), "wrote page");
            Ok(FileOutcome::Page)
        } else if self.config.is_asset(&file_name) {
            fs::create_dir_all(&target_dir).map_err(|e| Error::io(&target_dir, e))?;
            let output = target_dir.join(&file_name);
            fs::copy(path, &output).map_err(|e| Error::io(path, e))?;
            tracing::trace!(output = %output.display(), "copied asset");
            Ok(FileOutcome::Asset)
        } else {
            tracing::trace!(file = %file_name, "skipped");
            Ok(FileOutcome::Skipped)
        }
    }
}

/// Convert an exported space with the given settings.
pub fn run(config: &Config) -> Result<RunReport> {
    Converter::new(config.clone())?.run()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
