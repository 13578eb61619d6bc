//! Per-file outcomes and the collected batch summary

// crate modules
use crate::dimensions::Dimensions;
use crate::error::{Error, Result};
use crate::reader::FaciesFile;
use crate::writer::init_writer;

// ftools modules
use ftools_utils::{f, PathExt};

// standard library
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::path::{Path, PathBuf};

// external crates
use log::{info, warn};
use serde::Serialize;

/// Result of processing a single file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// Source file
    pub path: PathBuf,
    /// File name without the extension
    pub case_id: String,
    /// What happened
    pub outcome: Outcome,
}

impl FileReport {
    /// Record the outcome for the file at `path`
    pub fn new(path: &Path, outcome: Result<Success>) -> Self {
        Self {
            path: path.to_path_buf(),
            case_id: path.case_id().unwrap_or_default(),
            outcome: match outcome {
                Ok(success) => Outcome::Success(success),
                Err(e) => Outcome::Failure(Failure::from(&e)),
            },
        }
    }

    /// True if the file was read and every step succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }
}

impl std::fmt::Display for FileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.outcome {
            Outcome::Success(s) => write!(
                f,
                "{} ok: {} grid, {} facies, {} outputs",
                self.path.display(),
                s.dimensions,
                s.histogram.len(),
                s.outputs.len()
            ),
            Outcome::Failure(e) => {
                write!(f, "{} failed [{}]: {}", self.path.display(), e.kind, e.message)
            }
        }
    }
}

/// Success or failure of a single file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// File was converted
    Success(Success),
    /// File was skipped
    Failure(Failure),
}

/// Summary of a converted file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Success {
    /// Grid dimensions used
    pub dimensions: Dimensions,
    /// Number of cells for every facies code
    pub histogram: BTreeMap<i64, usize>,
    /// Every file written for this input
    pub outputs: Vec<PathBuf>,
}

impl Success {
    /// Summarise a converted file and the outputs written for it
    pub fn new(file: &FaciesFile, outputs: Vec<PathBuf>) -> Self {
        Self {
            dimensions: file.dimensions(),
            histogram: file.volume().histogram(),
            outputs,
        }
    }
}

/// Kind and description of the error that stopped a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Error kind, e.g. `ShapeMismatch`
    pub kind: String,
    /// Full error message including any underlying cause
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(error: &Error) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message += &f!(": {cause}");
            source = cause.source();
        }

        Self {
            kind: error.kind().to_string(),
            message,
        }
    }
}

/// Ordered collection of [FileReport]s for a directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Directory that was processed
    pub directory: PathBuf,
    /// One report per output file, in file name order
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    /// Collect reports for a directory
    pub fn new(directory: PathBuf, reports: Vec<FileReport>) -> Self {
        Self { directory, reports }
    }

    /// Total number of files processed
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Reports for files that converted
    pub fn successes(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.is_success())
    }

    /// Reports for files that failed
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| !r.is_success())
    }

    /// True if no file failed
    pub fn is_success(&self) -> bool {
        self.reports.iter().all(|r| r.is_success())
    }

    /// Log the final counts
    pub fn log(&self) {
        let failed = self.failures().count();
        if failed > 0 {
            warn!("Warning: {failed} of {} files failed", self.total());
        }

        info!(
            "Processed {} files in {}: {} succeeded, {} failed",
            self.total(),
            self.directory.display(),
            self.successes().count(),
            self.failures().count()
        );
    }

    /// Write the summary to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = init_writer(path)?;
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> FileReport {
        let error = Error::ShapeMismatch {
            source_name: "runs/b.out".to_string(),
            expected: 8,
            found: 7,
        };
        FileReport::new(Path::new("runs/b.out"), Err(error))
    }

    fn success() -> FileReport {
        FileReport::new(
            Path::new("runs/a.out"),
            Ok(Success {
                dimensions: Dimensions::new(2, 2, 2),
                histogram: BTreeMap::from([(0, 4), (1, 4)]),
                outputs: vec![],
            }),
        )
    }

    #[test]
    fn failure_report() {
        let report = failure();
        assert!(!report.is_success());
        assert_eq!(report.case_id, "b");
        match &report.outcome {
            Outcome::Failure(f) => {
                assert_eq!(f.kind, "ShapeMismatch");
                assert!(f.message.contains("runs/b.out"));
                assert!(f.message.contains("expected 8"));
            }
            _ => panic!("expected a failure"),
        }
    }

    #[test]
    fn summary_counts() {
        let summary = BatchSummary::new(PathBuf::from("runs"), vec![success(), failure()]);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.successes().count(), 1);
        assert_eq!(summary.failures().count(), 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn summary_json() {
        let summary = BatchSummary::new(PathBuf::from("runs"), vec![success(), failure()]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["reports"][0]["outcome"]["status"], "success");
        assert_eq!(json["reports"][0]["outcome"]["histogram"]["1"], 4);
        assert_eq!(json["reports"][1]["outcome"]["status"], "failure");
        assert_eq!(json["reports"][1]["outcome"]["kind"], "ShapeMismatch");
    }
}
