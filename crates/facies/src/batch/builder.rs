// crate modules
use crate::batch::{BatchReader, BoxedError, PostProcess};
use crate::dimensions::Dimensions;
use crate::reader::{FaciesFile, FaciesReader};

// standard library
use std::path::PathBuf;

/// Builder implementation for [BatchReader] configuration
///
/// Any number of parameters can be set this way (including none), and the
/// final [BatchReader] is made with [build()](BatchReaderBuilder::build).
///
/// ```rust, no_run
/// # use ftools_facies::{BatchReader, Dimensions};
/// let batch = BatchReader::builder()
///     .dimensions(Dimensions::new(100, 100, 50))
///     .delimiter(b' ')
///     .save_data(true)
///     .progress(true)
///     .build();
///
/// let summary = batch.process("./runs").unwrap();
/// ```
///
/// A post-processing step can be attached to run on every file that parsed
/// successfully. Any paths it returns are recorded as outputs for the file.
///
/// ```rust, no_run
/// # use ftools_facies::{BatchReader, FaciesFile};
/// let batch = BatchReader::builder()
///     .post_process(|file: &FaciesFile| {
///         println!("{} has {} facies", file.case_id, file.volume().unique_codes().len());
///         Ok(Vec::new())
///     })
///     .build();
/// ```
pub struct BatchReaderBuilder {
    /// Expected grid size
    dimensions: Dimensions,
    /// Field delimiter for the data rows
    delimiter: u8,
    /// Write .npy, .csv and .mat outputs
    save_data: bool,
    /// Show a progress bar over files
    progress: bool,
    /// Process files in parallel
    parallel: bool,
    /// Extra step for every parsed file
    post_process: Option<Box<PostProcess>>,
}

impl BatchReaderBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [BatchReader] type
    pub fn build(self) -> BatchReader {
        let mut reader = FaciesReader::new();
        reader.set_dimensions(self.dimensions);
        reader.set_delimiter(self.delimiter);

        BatchReader {
            reader,
            save_data: self.save_data,
            progress: self.progress,
            parallel: self.parallel,
            post_process: self.post_process,
        }
    }

    /// Expected grid size of every file, 256x256x128 by default
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Field delimiter for the data rows, `,` by default
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write `.npy`, `.csv` and `.mat` files next to every input
    pub fn save_data(mut self, save: bool) -> Self {
        self.save_data = save;
        self
    }

    /// Show per-file progress on stderr
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Process files in parallel
    ///
    /// Every file is independent, so this only changes the run time. Reports
    /// are still returned in file name order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run an extra step on every successfully parsed file
    ///
    /// An error from the step marks the file as failed, the batch carries on.
    pub fn post_process<F>(mut self, step: F) -> Self
    where
        F: Fn(&FaciesFile) -> Result<Vec<PathBuf>, BoxedError> + Send + Sync + 'static,
    {
        self.post_process = Some(Box::new(step));
        self
    }
}

impl Default for BatchReaderBuilder {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            delimiter: b',',
            save_data: false,
            progress: false,
            parallel: false,
            post_process: None,
        }
    }
}

impl std::fmt::Debug for BatchReaderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("BatchReaderBuilder")
            .field("dimensions", &self.dimensions)
            .field("delimiter", &(self.delimiter as char))
            .field("save_data", &self.save_data)
            .field("progress", &self.progress)
            .field("parallel", &self.parallel)
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}
