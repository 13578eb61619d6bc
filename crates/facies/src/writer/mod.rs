//! Write operations for persisted facies data
//!
//! Three formats are written alongside the source file, all sharing its base
//! name:
//!
//! | Output             | Content                                        |
//! |--------------------|------------------------------------------------|
//! | `<case_id>.npy`    | [FlattenedFacies] as an `(N, 1)` int64 array   |
//! | `<case_id>.csv`    | [FlattenedFacies] under a single `Facies` header |
//! | `<case_id>.mat`    | [LabeledRecord] as `Label` and `Facies` variables |
//!
//! ```rust, no_run
//! # use ftools_facies::{read_facies_file, write_outputs, Dimensions};
//! let file = read_facies_file("./runs/ti_001.out", Dimensions::default()).unwrap();
//!
//! // ./runs/ti_001.npy, ./runs/ti_001.csv, ./runs/ti_001.mat
//! let written = write_outputs(&file).unwrap();
//! ```

mod mat;

// crate modules
use crate::error::Result;
use crate::reader::FaciesFile;
use crate::record::FlattenedFacies;

// ftools modules
use ftools_utils::PathExt;

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// external crates
use log::debug;
use npyz::WriterBuilder;
use serde::Serialize;

#[doc(inline)]
pub use mat::{write_mat, write_mat_to};

/// Write every persisted format next to the source file
///
/// Returns the paths written, in `.npy`, `.csv`, `.mat` order.
pub fn write_outputs(file: &FaciesFile) -> Result<Vec<PathBuf>> {
    let column = file.flattened();
    let paths = vec![
        file.path.sibling(".npy"),
        file.path.sibling(".csv"),
        file.path.sibling(".mat"),
    ];

    write_npy(&column, &paths[0])?;
    write_csv(&column, &paths[1])?;
    write_mat(&file.labeled_record(), &paths[2])?;

    debug!("Wrote outputs for {}", file.case_id);
    Ok(paths)
}

/// Write a [FlattenedFacies] column to a NumPy `.npy` file
///
/// Stored as little endian int64 with shape `(N, 1)`.
pub fn write_npy<P: AsRef<Path>>(column: &FlattenedFacies, path: P) -> Result<()> {
    write_npy_to(column, init_writer(path)?)
}

/// Write a [FlattenedFacies] column in `.npy` format to any writer
pub fn write_npy_to<W: Write>(column: &FlattenedFacies, writer: W) -> Result<()> {
    let mut npy = npyz::WriteOptions::new()
        .default_dtype()
        .shape(&[column.len() as u64, 1])
        .writer(writer)
        .begin_nd()?;

    for code in column.values() {
        npy.push(code)?;
    }

    npy.finish()?;
    Ok(())
}

/// Single row of the tabular output
#[derive(Serialize)]
struct FaciesRow {
    #[serde(rename = "Facies")]
    facies: i64,
}

/// Write a [FlattenedFacies] column to a `.csv` file
///
/// One header row of `Facies` followed by one code per row, no index.
pub fn write_csv<P: AsRef<Path>>(column: &FlattenedFacies, path: P) -> Result<()> {
    write_csv_to(column, init_writer(path)?)
}

/// Write a [FlattenedFacies] column in `.csv` format to any writer
pub fn write_csv_to<W: Write>(column: &FlattenedFacies, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for code in column.values() {
        csv_writer.serialize(FaciesRow { facies: *code })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Initialise a writer from anything that can be turned into a path
pub(crate) fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> FlattenedFacies {
        FlattenedFacies::new(vec![7, 3, 5, 1, 6, 2, 4, 0])
    }

    #[test]
    fn csv_layout() {
        let mut buffer = Vec::new();
        write_csv_to(&column(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Facies\n7\n3\n5\n1\n6\n2\n4\n0\n");
    }

    #[test]
    fn npy_layout() {
        let mut buffer = Vec::new();
        write_npy_to(&column(), &mut buffer).unwrap();

        // magic string and version 1.0
        assert_eq!(&buffer[..6], b"\x93NUMPY");
        assert_eq!(&buffer[6..8], &[1, 0]);

        // header describes an (8, 1) int64 array
        let header_len = u16::from_le_bytes([buffer[8], buffer[9]]) as usize;
        let header = String::from_utf8_lossy(&buffer[10..10 + header_len]);
        assert!(header.contains("<i8"), "{header}");
        // npyz writes a trailing comma after the last axis
        assert!(header.contains("'shape': (8, 1"), "{header}");

        // data follows the header directly
        let data = &buffer[10 + header_len..];
        assert_eq!(data.len(), 8 * 8);
        assert_eq!(i64::from_le_bytes(data[..8].try_into().unwrap()), 7);
        assert_eq!(i64::from_le_bytes(data[56..].try_into().unwrap()), 0);
    }
}
