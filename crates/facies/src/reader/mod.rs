//! Readers for facies simulation output files
//!
//! # Quickstart
//!
//! ```rust, no_run
//! # use ftools_facies::{read_facies_file, Dimensions};
//! // Read a single realisation on the default 256x256x128 grid
//! let file = read_facies_file("./runs/ti_001.out", Dimensions::default()).unwrap();
//!
//! // Reoriented volume, ready for slicing or writing
//! let volume = file.volume();
//! ```
//!
//! For anything other than the defaults, use a [FaciesReader] directly.
//!
//! ```rust, no_run
//! # use ftools_facies::{reader::FaciesReader, Dimensions};
//! # use std::path::Path;
//! let mut reader = FaciesReader::new();
//! reader.set_dimensions(Dimensions::new(100, 100, 50));
//! reader.set_delimiter(b' ');
//!
//! let file = reader.read(Path::new("./runs/ti_001.out")).unwrap();
//! ```
//!
//! # File format
//!
//! Files are GSLIB style text tables:
//!
//! ```text
//! TI (256x256x128)            <- title
//! 1                           <- number of variables
//! facies                      <- variable name
//! 0
//! 2
//! 1
//! ...
//! ```
//!
//! The three leading lines are always skipped as a header, whatever they
//! contain. They are kept as a [GslibHeader] purely for information, and an
//! unexpected variable count or grid size in the title only raises a warning.
//!
//! Every field of every following row is taken in order, so multi-column
//! tables are read row by row. The total number of codes must fill the grid
//! exactly.

mod parsers;

// crate modules
use crate::dimensions::Dimensions;
use crate::error::{Error, Result};
use crate::record::{FlattenedFacies, LabeledRecord};
use crate::table::RawTable;
use crate::volume::Volume;

// ftools modules
use ftools_utils::{f, OptionExt, PathExt};

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

// external crates
use log::{debug, trace, warn};

/// Most codes reserved up front for a single file
const RESERVE_LIMIT: usize = 1 << 24;

/// Number of leading lines skipped before the data rows
pub const HEADER_LINES: usize = 3;

/// Read a facies output file on the given grid
///
/// Returns a [FaciesFile] with the table exactly as read and the reoriented
/// [Volume].
///
/// - `path` - Path to the output file, can be [&str], [String], [Path], etc...
/// - `dimensions` - Expected grid size
///
/// ```rust, no_run
/// # use ftools_facies::{read_facies_file, Dimensions};
/// let file = read_facies_file("path/to/ti_001.out", Dimensions::new(64, 64, 32)).unwrap();
/// println!("{}", file.header);
/// ```
pub fn read_facies_file<P: AsRef<Path>>(path: P, dimensions: Dimensions) -> Result<FaciesFile> {
    let mut reader = FaciesReader::new();
    reader.set_dimensions(dimensions);
    reader.read(path.as_ref())
}

/// Reader for GSLIB style facies tables
#[derive(Debug, Clone, PartialEq)]
pub struct FaciesReader {
    /// Expected grid size
    dimensions: Dimensions,
    /// Field delimiter for the data rows
    delimiter: u8,
}

impl Default for FaciesReader {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            delimiter: b',',
        }
    }
}

impl FaciesReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Setter for the expected grid size
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    /// Setter for the field delimiter, `,` by default
    ///
    /// Repeated delimiters are tolerated, so `b' '` reads space aligned
    /// columns.
    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    /// Expected grid size
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Parse a single output file
    pub fn read(&self, path: &Path) -> Result<FaciesFile> {
        debug!("Reading {}", path.display());

        let case_id = path.case_id().ok_or_else(|| Error::FileFormat {
            path: path.to_path_buf(),
            reason: "no file name to use as a case identifier".to_string(),
        })?;

        let mut reader = BufReader::new(File::open(path)?);
        let header = Self::read_header(&mut reader, path)?;
        self.check_header(&header, path);

        let codes = self.read_codes(reader, path)?;
        let table = RawTable::with_source(codes, self.dimensions, &path.display().to_string())?;

        Ok(FaciesFile::new(path.to_path_buf(), case_id, header, table))
    }
}

impl FaciesReader {
    /// Consume the leading header lines
    fn read_header<R: BufRead>(reader: &mut R, path: &Path) -> Result<GslibHeader> {
        let mut lines = Vec::with_capacity(HEADER_LINES);
        for _ in 0..HEADER_LINES {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Err(Error::FileFormat {
                    path: path.to_path_buf(),
                    reason: f!(
                        "expected {HEADER_LINES} header lines, found {}",
                        lines.len()
                    ),
                });
            }
            lines.push(line.trim_end_matches(&['\r', '\n'][..]).to_string());
        }

        let header = GslibHeader::from_lines(&lines[0], &lines[1], &lines[2]);
        trace!("{header}");
        Ok(header)
    }

    /// Warn about anything in the header that disagrees with the settings
    fn check_header(&self, header: &GslibHeader, path: &Path) {
        match header.variables {
            Some(1) => (),
            other => warn!(
                "Warning: {} declares {} variables, reading every field as a facies code",
                path.display(),
                other.display()
            ),
        }

        if let Some(hint) = header.grid_hint {
            if hint != self.dimensions {
                warn!(
                    "Warning: {} title suggests a {hint} grid, reading as {}",
                    path.display(),
                    self.dimensions
                );
            }
        }
    }

    /// Collect every integer field of every data row
    fn read_codes<R: BufRead>(&self, reader: R, path: &Path) -> Result<Vec<i64>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        // grow past the cap as codes arrive, the file may be far shorter than the grid
        let reserve = self.dimensions.number_of_cells().unwrap_or(0);
        let mut codes = Vec::with_capacity(reserve.min(RESERVE_LIMIT));
        let mut record = csv::StringRecord::new();

        loop {
            let is_record = csv_reader
                .read_record(&mut record)
                .map_err(|e| Error::FileFormat {
                    path: path.to_path_buf(),
                    reason: f!("unreadable data row ({e})"),
                })?;

            if !is_record {
                break;
            }

            for field in record.iter().filter(|field| !field.is_empty()) {
                let code = field.parse::<i64>().map_err(|_| Error::FileFormat {
                    path: path.to_path_buf(),
                    reason: f!(
                        "non-integer facies code \"{field}\" on line {}",
                        Self::file_line(&record)
                    ),
                })?;
                codes.push(code);
            }
        }

        debug!("Found {} facies codes in {}", codes.len(), path.display());
        Ok(codes)
    }

    /// Line number in the original file, header included
    fn file_line(record: &csv::StringRecord) -> u64 {
        record
            .position()
            .map(|p| p.line() + HEADER_LINES as u64)
            .unwrap_or_default()
    }
}

/// The three leading lines of a GSLIB style table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GslibHeader {
    /// First line, free text
    pub title: String,
    /// Declared number of variables, if the second line starts with one
    pub variables: Option<usize>,
    /// Third line, normally the variable name
    pub names: String,
    /// Grid size found in the title, if any
    pub grid_hint: Option<Dimensions>,
}

impl GslibHeader {
    /// Interpret the raw header lines
    pub fn from_lines(title: &str, count: &str, names: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            variables: parsers::variable_count(count).ok().map(|(_, n)| n),
            names: names.trim().to_string(),
            grid_hint: parsers::grid_size_hint(title),
        }
    }
}

impl std::fmt::Display for GslibHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "GslibHeader {{ title: \"{}\", variables: {}, names: \"{}\", grid: {} }}",
            self.title,
            self.variables.display(),
            self.names,
            self.grid_hint.display()
        )
    }
}

/// Everything derived from a single output file
///
/// Every file gets its own [FaciesFile], so nothing is shared between files
/// in a batch. The [Volume] is built once on construction, and the persisted
/// forms are derived on request.
#[derive(Debug, Clone, PartialEq)]
pub struct FaciesFile {
    /// Source file
    pub path: PathBuf,
    /// File name without the extension
    pub case_id: String,
    /// Skipped leading lines
    pub header: GslibHeader,
    table: RawTable,
    volume: Volume,
}

impl FaciesFile {
    /// Bundle a parsed table with its reoriented volume
    pub fn new(path: PathBuf, case_id: String, header: GslibHeader, table: RawTable) -> Self {
        let volume = table.to_volume();
        Self {
            path,
            case_id,
            header,
            table,
            volume,
        }
    }

    /// Codes in file order
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    /// Reoriented `[x, y, z]` volume
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Grid dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.table.dimensions()
    }

    /// Column for the `.npy` and `.csv` outputs
    pub fn flattened(&self) -> FlattenedFacies {
        self.volume.to_flattened_column()
    }

    /// Labelled array for the `.mat` output
    pub fn labeled_record(&self) -> LabeledRecord {
        LabeledRecord::from_table(self.case_id.clone(), &self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader() -> FaciesReader {
        let mut reader = FaciesReader::new();
        reader.set_dimensions(Dimensions::new(2, 2, 2));
        reader
    }

    #[test]
    fn header_lines() {
        let mut text = Cursor::new("TI (2x2x2)\r\n1\r\nfacies\r\n0\r\n");
        let header = FaciesReader::read_header(&mut text, Path::new("a.out")).unwrap();
        assert_eq!(header.title, "TI (2x2x2)");
        assert_eq!(header.variables, Some(1));
        assert_eq!(header.names, "facies");
        assert_eq!(header.grid_hint, Some(Dimensions::new(2, 2, 2)));
    }

    #[test]
    fn short_header() {
        let mut text = Cursor::new("title\n1\n");
        let err = FaciesReader::read_header(&mut text, Path::new("a.out")).unwrap_err();
        assert!(matches!(err, Error::FileFormat { .. }));
    }

    #[test]
    fn header_without_count() {
        let header = GslibHeader::from_lines("realisation", "facies", "");
        assert_eq!(header.variables, None);
        assert_eq!(header.grid_hint, None);
    }

    #[test]
    fn codes_single_column() {
        let text = Cursor::new("0\n1\n\n2\n 3 \n");
        let codes = reader().read_codes(text, Path::new("a.out")).unwrap();
        assert_eq!(codes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn codes_multi_column() {
        let text = Cursor::new("0,1\n2,3,\n4\n");
        let codes = reader().read_codes(text, Path::new("a.out")).unwrap();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn codes_space_aligned() {
        let mut reader = reader();
        reader.set_delimiter(b' ');
        let text = Cursor::new("  0   1\n 12  -3\n");
        let codes = reader.read_codes(text, Path::new("a.out")).unwrap();
        assert_eq!(codes, vec![0, 1, 12, -3]);
    }

    #[test]
    fn codes_not_integers() {
        let text = Cursor::new("0\n1\nsand\n");
        let err = reader().read_codes(text, Path::new("a.out")).unwrap_err();
        match err {
            Error::FileFormat { path, reason } => {
                assert_eq!(path, PathBuf::from("a.out"));
                assert!(reason.contains("\"sand\""), "{reason}");
                assert!(reason.contains("line 6"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let text = Cursor::new("0\n1.5\n");
        assert!(reader().read_codes(text, Path::new("a.out")).is_err());
    }

    #[test]
    fn codes_on_huge_grid() {
        // reservation stays bounded when the grid dwarfs the file
        let mut reader = reader();
        reader.set_dimensions(Dimensions::new(1 << 20, 1 << 20, 1 << 10));
        let codes = reader
            .read_codes(Cursor::new("0\n1\n"), Path::new("a.out"))
            .unwrap();
        assert_eq!(codes, vec![0, 1]);

        reader.set_dimensions(Dimensions::new(usize::MAX, 2, 1));
        let codes = reader
            .read_codes(Cursor::new("0\n1\n"), Path::new("a.out"))
            .unwrap();
        assert_eq!(codes, vec![0, 1]);
    }
}
