// crate modules
use crate::dimensions::Dimensions;
use crate::error::{Error, Result};
use crate::volume::Volume;

/// Flat facies codes exactly as they appear in a simulation output file
///
/// The simulation writes one code per row with z varying slowest and x
/// fastest, so the table is logically a row-major `(nz, ny, nx)` array.
///
/// ```text
/// row 0        -> (z=0, y=0, x=0)
/// row 1        -> (z=0, y=0, x=1)
/// ...
/// row nx       -> (z=0, y=1, x=0)
/// ...
/// row nx*ny    -> (z=1, y=0, x=0)
/// ```
///
/// The length is checked against the [Dimensions] on construction, so every
/// [RawTable] can be reshaped without further validation.
///
/// ```rust
/// # use ftools_facies::{Dimensions, RawTable};
/// let table = RawTable::new((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap();
/// assert_eq!(table.get(1, 0, 1), Some(5));
///
/// // one code short of a full grid
/// assert!(RawTable::new((0..7).collect(), Dimensions::new(2, 2, 2)).is_err());
///
/// // more cells than fit in memory
/// assert!(RawTable::new(vec![0], Dimensions::new(usize::MAX, 2, 1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    dimensions: Dimensions,
    codes: Vec<i64>,
}

impl RawTable {
    /// Wrap flat facies codes, checking the length against the grid
    pub fn new(codes: Vec<i64>, dimensions: Dimensions) -> Result<Self> {
        Self::with_source(codes, dimensions, "raw table")
    }

    /// Same as [RawTable::new()] but names the source in any error
    pub(crate) fn with_source(
        codes: Vec<i64>,
        dimensions: Dimensions,
        source_name: &str,
    ) -> Result<Self> {
        // a grid too large to count can never be filled
        let expected = dimensions.number_of_cells();
        if expected != Some(codes.len()) {
            return Err(Error::ShapeMismatch {
                source_name: source_name.to_string(),
                expected: expected.unwrap_or(usize::MAX),
                found: codes.len(),
            });
        }

        Ok(Self { dimensions, codes })
    }

    /// Codes that are already known to fill the grid
    pub(crate) fn from_validated(codes: Vec<i64>, dimensions: Dimensions) -> Self {
        debug_assert_eq!(Some(codes.len()), dimensions.number_of_cells());
        Self { dimensions, codes }
    }

    /// Grid dimensions of the table
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Codes in file order
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    /// Take ownership of the codes in file order
    pub fn into_codes(self) -> Vec<i64> {
        self.codes
    }

    /// Code at `(z, y, x)` of the reshaped `(nz, ny, nx)` array
    pub fn get(&self, z: usize, y: usize, x: usize) -> Option<i64> {
        let d = &self.dimensions;
        if z >= d.nz || y >= d.ny || x >= d.nx {
            return None;
        }
        self.codes.get((z * d.ny + y) * d.nx + x).copied()
    }

    /// Reshape, transpose and flip into a [Volume]
    ///
    /// See [Volume::parse()] for the exact reindexing.
    pub fn to_volume(&self) -> Volume {
        Volume::from_table(self)
    }
}
