//! Persisted forms of a facies volume
//!
//! Two independent derivations are written to disk:
//!
//! - [FlattenedFacies] is the transposed and flipped [Volume](crate::Volume)
//!   flattened to a column, used for `.npy` and `.csv` outputs
//! - [LabeledRecord] is the untransposed `(nz, ny, nx)` table with its own
//!   flip, used for `.mat` outputs
//!
//! These do not agree element for element. Both are kept exactly as derived
//! for whatever reads them downstream.

// crate modules
use crate::dimensions::Dimensions;
use crate::table::RawTable;

/// Single column of facies codes for tabular outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedFacies(Vec<i64>);

impl FlattenedFacies {
    /// Wrap an already flattened column
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    /// Codes from top to bottom of the column
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty column
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the column
    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

/// A case identifier paired with the flipped `(nz, ny, nx)` facies array
///
/// Derived straight from the [RawTable], never from a [Volume](crate::Volume).
/// The flattened element order of the table is reversed once, and the shape is
/// left as `(nz, ny, nx)`.
///
/// ```rust
/// # use ftools_facies::{Dimensions, LabeledRecord, RawTable};
/// let table = RawTable::new((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap();
/// let record = LabeledRecord::from_table("ti_001", &table);
///
/// assert_eq!(record.case_id, "ti_001");
/// assert_eq!(record.shape(), [2, 2, 2]);
/// assert_eq!(record.codes(), &[7, 6, 5, 4, 3, 2, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRecord {
    /// Name of the source file without the extension
    pub case_id: String,
    dimensions: Dimensions,
    codes: Vec<i64>,
}

impl LabeledRecord {
    /// Pair `case_id` with the flipped table
    pub fn from_table(case_id: impl Into<String>, table: &RawTable) -> Self {
        let mut codes = table.codes().to_vec();
        codes.reverse();
        Self {
            case_id: case_id.into(),
            dimensions: table.dimensions(),
            codes,
        }
    }

    /// Array shape as `[nz, ny, nx]`
    pub fn shape(&self) -> [usize; 3] {
        let d = &self.dimensions;
        [d.nz, d.ny, d.nx]
    }

    /// Codes in row-major `(nz, ny, nx)` order
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    /// Code at `[i, j, k]` of the `(nz, ny, nx)` array
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<i64> {
        let [n0, n1, n2] = self.shape();
        if i >= n0 || j >= n1 || k >= n2 {
            return None;
        }
        self.codes.get((i * n1 + j) * n2 + k).copied()
    }

    /// Codes with the first axis varying fastest
    ///
    /// Column-major storage as expected by MAT-files.
    pub fn column_major(&self) -> impl Iterator<Item = i64> + '_ {
        let [n0, n1, n2] = self.shape();
        (0..n2).flat_map(move |k| {
            (0..n1).flat_map(move |j| (0..n0).map(move |i| self.codes[(i * n1 + j) * n2 + k]))
        })
    }
}
