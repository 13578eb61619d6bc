//! Batch conversion of every output file in a directory
//!
//! Each `.out` file in the directory is read, reoriented, and optionally
//! written to disk. Files are processed independently, so a malformed file
//! is reported and the batch carries on with the next one.
//!
//! ```rust, no_run
//! # use ftools_facies::BatchReader;
//! let summary = BatchReader::builder()
//!     .save_data(true)
//!     .build()
//!     .process("./runs")
//!     .unwrap();
//!
//! for report in summary.failures() {
//!     println!("{}", report);
//! }
//! ```
//!
//! Nothing is shared between files. Every file gets its own
//! [FaciesFile](crate::FaciesFile), which is dropped once the file has been
//! written and post-processed, and the [BatchSummary] only keeps a
//! [FileReport] per file.

mod builder;
mod report;

#[doc(inline)]
pub use builder::BatchReaderBuilder;

#[doc(inline)]
pub use report::{BatchSummary, Failure, FileReport, Outcome, Success};

// crate modules
use crate::error::{Error, Result};
use crate::reader::{FaciesFile, FaciesReader};
use crate::writer::write_outputs;

// ftools modules
use ftools_utils::PathExt;

// standard library
use std::path::{Path, PathBuf};

// external crates
use kdam::{par_tqdm, BarBuilder, BarExt};
use log::{error, info, warn};
use rayon::prelude::*;

/// Suffix identifying simulation output files
pub const OUTPUT_SUFFIX: &str = ".out";

/// Signature of a post-processing step run on every parsed file
///
/// Returns any paths written so they can be recorded against the file.
pub type PostProcess = dyn Fn(&FaciesFile) -> std::result::Result<Vec<PathBuf>, BoxedError> + Send + Sync;

/// Error type accepted from post-processing steps
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Reads, converts and reports on every output file in a directory
///
/// Use [BatchReader::builder()] to configure. The defaults read the standard
/// 256x256x128 grid with no outputs written and no progress bar.
pub struct BatchReader {
    pub(crate) reader: FaciesReader,
    pub(crate) save_data: bool,
    pub(crate) progress: bool,
    pub(crate) parallel: bool,
    pub(crate) post_process: Option<Box<PostProcess>>,
}

impl BatchReader {
    /// Start with the default configuration
    pub fn new() -> Self {
        Default::default()
    }

    /// Get an instance of the [BatchReaderBuilder]
    pub fn builder() -> BatchReaderBuilder {
        BatchReaderBuilder::default()
    }

    /// Process every output file in `directory`
    ///
    /// Fails only with [Error::DirectoryNotFound] or if the directory can
    /// not be listed. Problems with individual files are recorded in the
    /// returned [BatchSummary] instead.
    pub fn process<P: AsRef<Path>>(&self, directory: P) -> Result<BatchSummary> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(Error::DirectoryNotFound(directory.to_path_buf()));
        }

        let files = list_output_files(directory)?;
        info!(
            "Current directory: {} | Total files: {}",
            directory.display(),
            files.len()
        );

        let reports = match self.parallel {
            true => self.process_parallel(&files),
            false => self.process_sequential(&files),
        };

        let summary = BatchSummary::new(directory.to_path_buf(), reports);
        summary.log();
        Ok(summary)
    }

    /// Read a single file and run every configured step on it
    ///
    /// Errors are captured in the [FileReport] rather than returned.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let report = FileReport::new(path, self.try_process_file(path));

        match report.is_success() {
            true => info!("Processed {}", path.display()),
            false => error!("{report}"),
        }

        report
    }
}

impl BatchReader {
    /// One file after another, with a progress bar if wanted
    fn process_sequential(&self, files: &[PathBuf]) -> Vec<FileReport> {
        // a broken terminal must not cost the reports
        let mut progress_bar = BarBuilder::default()
            .total(files.len())
            .desc("Processing")
            .unit(" files")
            .disable(!self.progress)
            .build()
            .map_err(|e| warn!("Warning: Progress bar unavailable ({e})"))
            .ok();

        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            reports.push(self.process_file(path));
            if let Some(bar) = progress_bar.as_mut() {
                if let Err(e) = bar.update(1) {
                    warn!("Warning: Progress bar update failed ({e})");
                    progress_bar = None;
                }
            }
        }

        if self.progress {
            eprintln!();
        }

        reports
    }

    /// All files at once, reports collected in the original order
    fn process_parallel(&self, files: &[PathBuf]) -> Vec<FileReport> {
        let reports = par_tqdm!(
            files.par_iter().map(|path| self.process_file(path)),
            desc = "Processing",
            unit = " files",
            disable = !self.progress
        )
        .collect();

        if self.progress {
            eprintln!();
        }

        reports
    }

    /// Everything that can go wrong for a single file
    fn try_process_file(&self, path: &Path) -> Result<Success> {
        let file = self.reader.read(path)?;
        let mut outputs = Vec::new();

        if self.save_data {
            outputs.extend(write_outputs(&file)?);
        }

        if let Some(step) = &self.post_process {
            let written = step(&file).map_err(|source| Error::PostProcess {
                case_id: file.case_id.clone(),
                source,
            })?;
            outputs.extend(written);
        }

        Ok(Success::new(&file, outputs))
    }
}

impl Default for BatchReader {
    fn default() -> Self {
        BatchReaderBuilder::default().build()
    }
}

impl std::fmt::Debug for BatchReader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("BatchReader")
            .field("reader", &self.reader)
            .field("save_data", &self.save_data)
            .field("progress", &self.progress)
            .field("parallel", &self.parallel)
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}

/// Every file ending in `.out`, sorted by name
///
/// Directory listings come back in no particular order, so sorting keeps the
/// reports reproducible between runs and platforms.
pub fn list_output_files<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let mut files = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.ends_with_suffix(OUTPUT_SUFFIX))
        .collect::<Vec<PathBuf>>();

    files.sort();
    Ok(files)
}
