//! Module for the reoriented 3D facies volume

// crate modules
use crate::dimensions::Dimensions;
use crate::error::{Error, Result};
use crate::record::FlattenedFacies;
use crate::table::RawTable;

// ftools modules
use ftools_utils::SliceExt;

// standard library
use std::collections::BTreeMap;

/// Facies codes reoriented onto an `[x, y, z]` indexed grid
///
/// A [Volume] is a pure reindexing of a [RawTable]. No values are interpolated
/// or validated, so every code in the file appears in the volume exactly as
/// many times as it did in the file.
///
/// ## Orientation
///
/// The raw table is taken through three steps, in this order:
///
/// 1. Reshape the flat codes into a row-major `(nz, ny, nx)` array `R`
/// 2. Transpose to `(nx, ny, nz)` so that `T[x][y][z] = R[z][y][x]`
/// 3. Flip `T` by reversing its flattened element order
///
/// The flip is a reversal of the whole traversal, not a mirror of a single
/// axis. The result is stored flat in row-major `(nx, ny, nz)` order, i.e. the
/// code for `(x, y, z)` is at `(x*ny + y)*nz + z`.
///
/// For example, the 2x2x2 table `[0, 1, 2, 3, 4, 5, 6, 7]`:
///
/// ```rust
/// # use ftools_facies::{Dimensions, Volume};
/// let volume = Volume::parse((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap();
/// assert_eq!(volume.codes(), &[7, 3, 5, 1, 6, 2, 4, 0]);
///
/// // the first cell is the last cell of the transposed array
/// assert_eq!(volume.get(0, 0, 0), Some(7));
/// ```
///
/// ## Inverse
///
/// Everything is reversible, so the original file order is always available
/// again through [Volume::to_raw_table()].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    dimensions: Dimensions,
    codes: Vec<i64>,
}

/// Construction
impl Volume {
    /// Reshape a flat table of facies codes into a [Volume]
    ///
    /// `raw` must contain exactly `nx*ny*nz` codes in file order, otherwise
    /// this fails with [Error::ShapeMismatch].
    ///
    /// ```rust
    /// # use ftools_facies::{Dimensions, Volume, Error};
    /// let dimensions = Dimensions::new(2, 2, 2);
    /// assert!(Volume::parse(vec![1; 8], dimensions).is_ok());
    ///
    /// let result = Volume::parse(vec![1; 7], dimensions);
    /// assert!(matches!(result, Err(Error::ShapeMismatch { expected: 8, found: 7, .. })));
    /// ```
    pub fn parse(raw: Vec<i64>, dimensions: Dimensions) -> Result<Self> {
        Ok(RawTable::new(raw, dimensions)?.to_volume())
    }

    /// Transpose then flip an already validated table
    pub(crate) fn from_table(table: &RawTable) -> Self {
        let dimensions = table.dimensions();
        let mut codes = transpose_zyx_to_xyz(table.codes(), &dimensions);
        codes.reverse();
        Self { dimensions, codes }
    }
}

/// General accessors
impl Volume {
    /// Grid dimensions of the volume
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Codes in row-major `(nx, ny, nz)` order
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True for a volume with no cells
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code at `(x, y, z)`, or `None` if outside the grid
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<i64> {
        let d = &self.dimensions;
        if x >= d.nx || y >= d.ny || z >= d.nz {
            return None;
        }
        self.codes.get((x * d.ny + y) * d.nz + z).copied()
    }

    /// Sorted list of the distinct facies codes present
    pub fn unique_codes(&self) -> Vec<i64> {
        self.codes.unique_sorted()
    }

    /// Number of cells for every facies code present
    pub fn histogram(&self) -> BTreeMap<i64, usize> {
        self.codes.histogram()
    }

    /// Largest facies code, `None` for an empty volume
    pub fn max_code(&self) -> Option<i64> {
        self.codes.iter().max().copied()
    }

    /// Smallest facies code, `None` for an empty volume
    pub fn min_code(&self) -> Option<i64> {
        self.codes.iter().min().copied()
    }
}

/// Derived forms
impl Volume {
    /// Flatten into a single column for tabular outputs
    ///
    /// The order is the row-major `(nx, ny, nz)` order the volume is held in.
    /// There is no additional flip, so this is **not** the file order.
    ///
    /// ```rust
    /// # use ftools_facies::{Dimensions, Volume};
    /// let volume = Volume::parse((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap();
    /// let column = volume.to_flattened_column();
    /// assert_eq!(column.values(), &[7, 3, 5, 1, 6, 2, 4, 0]);
    /// ```
    pub fn to_flattened_column(&self) -> FlattenedFacies {
        FlattenedFacies::new(self.codes.clone())
    }

    /// Cross-section at a fixed z
    ///
    /// The `axis_index` is 1-indexed, so valid values are `1..=nz` and the
    /// slice returned is at `z = axis_index - 1`. Anything else fails with
    /// [Error::IndexOutOfRange].
    ///
    /// ```rust
    /// # use ftools_facies::{Dimensions, Volume};
    /// let volume = Volume::parse((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap();
    /// let slice = volume.extract_slice(1).unwrap();
    /// assert_eq!(slice.codes(), &[7, 5, 6, 4]);
    ///
    /// assert!(volume.extract_slice(0).is_err());
    /// assert!(volume.extract_slice(3).is_err());
    /// ```
    pub fn extract_slice(&self, axis_index: usize) -> Result<Slice2D> {
        let d = &self.dimensions;
        if axis_index < 1 || axis_index > d.nz {
            return Err(Error::IndexOutOfRange {
                index: axis_index,
                min: 1,
                max: d.nz,
            });
        }

        let z = axis_index - 1;
        let mut codes = Vec::with_capacity(d.cells_per_slice());
        for x in 0..d.nx {
            for y in 0..d.ny {
                codes.push(self.codes[(x * d.ny + y) * d.nz + z]);
            }
        }

        Ok(Slice2D {
            nx: d.nx,
            ny: d.ny,
            z,
            codes,
        })
    }

    /// Undo the flip and transpose to recover the file order
    ///
    /// ```rust
    /// # use ftools_facies::{Dimensions, Volume};
    /// let raw: Vec<i64> = vec![3, 1, 4, 1, 5, 9, 2, 6];
    /// let volume = Volume::parse(raw.clone(), Dimensions::new(2, 2, 2)).unwrap();
    /// assert_eq!(volume.to_raw_table().codes(), &raw[..]);
    /// ```
    pub fn to_raw_table(&self) -> RawTable {
        let mut transposed = self.codes.clone();
        transposed.reverse();
        let codes = transpose_xyz_to_zyx(&transposed, &self.dimensions);
        RawTable::from_validated(codes, self.dimensions)
    }

    /// Codes of the unflipped `(nx, ny, nz)` array with x varying fastest
    ///
    /// This is the cell ordering of a VTK structured grid, and is what the
    /// volumetric view displays. Undoing the flip and then walking x fastest
    /// lands back on the file order, so this is the same sequence as
    /// [Volume::to_raw_table()].
    pub fn flipped_cells(&self) -> Vec<i64> {
        self.to_raw_table().into_codes()
    }
}

/// Row-major `(nz, ny, nx)` to row-major `(nx, ny, nz)`
fn transpose_zyx_to_xyz(codes: &[i64], d: &Dimensions) -> Vec<i64> {
    let mut transposed = Vec::with_capacity(codes.len());
    for x in 0..d.nx {
        for y in 0..d.ny {
            for z in 0..d.nz {
                transposed.push(codes[(z * d.ny + y) * d.nx + x]);
            }
        }
    }
    transposed
}

/// Row-major `(nx, ny, nz)` back to row-major `(nz, ny, nx)`
fn transpose_xyz_to_zyx(codes: &[i64], d: &Dimensions) -> Vec<i64> {
    let mut transposed = Vec::with_capacity(codes.len());
    for z in 0..d.nz {
        for y in 0..d.ny {
            for x in 0..d.nx {
                transposed.push(codes[(x * d.ny + y) * d.nz + z]);
            }
        }
    }
    transposed
}

/// A 2D cross-section of a [Volume] at fixed z
///
/// Stored row-major with one row per x and one column per y, so that rows map
/// to image rows when plotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice2D {
    /// Number of rows (x)
    pub nx: usize,
    /// Number of columns (y)
    pub ny: usize,
    /// Zero-based z index of the slice
    pub z: usize,
    codes: Vec<i64>,
}

impl Slice2D {
    /// Codes in row-major `(nx, ny)` order
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    /// Code at `(x, y)`, or `None` if outside the slice
    pub fn get(&self, x: usize, y: usize) -> Option<i64> {
        if x >= self.nx || y >= self.ny {
            return None;
        }
        self.codes.get(x * self.ny + y).copied()
    }

    /// Iterate over rows of constant x
    pub fn rows(&self) -> std::slice::ChunksExact<'_, i64> {
        self.codes.chunks_exact(self.ny.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Volume {
        Volume::parse((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap()
    }

    /// The same reindexing written out the long way, cell by cell
    fn reference(raw: &[i64], d: Dimensions) -> Vec<i64> {
        let mut transposed = vec![0; raw.len()];
        for z in 0..d.nz {
            for y in 0..d.ny {
                for x in 0..d.nx {
                    transposed[(x * d.ny + y) * d.nz + z] = raw[(z * d.ny + y) * d.nx + x];
                }
            }
        }
        transposed.into_iter().rev().collect()
    }

    #[test]
    fn cube_fixture() {
        let volume = fixture();
        let raw = (0..8).collect::<Vec<i64>>();
        assert_eq!(volume.codes(), &[7, 3, 5, 1, 6, 2, 4, 0]);
        assert_eq!(volume.codes(), &reference(&raw, volume.dimensions())[..]);
    }

    #[test]
    fn uneven_dimensions_match_reference() {
        let d = Dimensions::new(4, 3, 2);
        let raw: Vec<i64> = (0..24).map(|i| (i * 7) % 11).collect();
        let volume = Volume::parse(raw.clone(), d).unwrap();
        assert_eq!(volume.codes(), &reference(&raw, d)[..]);

        // flipped cell (x, y, z) comes from (nz-1-z, ny-1-y, nx-1-x) in the file
        let table = RawTable::new(raw, d).unwrap();
        for x in 0..d.nx {
            for y in 0..d.ny {
                for z in 0..d.nz {
                    assert_eq!(
                        volume.get(x, y, z),
                        table.get(d.nz - 1 - z, d.ny - 1 - y, d.nx - 1 - x)
                    );
                }
            }
        }
    }

    #[test]
    fn codes_are_preserved() {
        let d = Dimensions::new(3, 5, 2);
        let raw: Vec<i64> = (0..30).map(|i| (i % 4) - 1).collect();
        let volume = Volume::parse(raw.clone(), d).unwrap();

        let mut expected = raw.clone();
        let mut found = volume.codes().to_vec();
        expected.sort();
        found.sort();
        assert_eq!(expected, found);
        assert_eq!(volume.histogram(), raw.histogram());
    }

    #[test]
    fn parse_is_deterministic() {
        let d = Dimensions::new(3, 2, 4);
        let raw: Vec<i64> = (0..24).rev().collect();
        let a = Volume::parse(raw.clone(), d).unwrap();
        let b = Volume::parse(raw, d).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shape_mismatch() {
        let d = Dimensions::new(2, 2, 2);
        let err = Volume::parse((0..7).collect(), d).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 8,
                found: 7,
                ..
            }
        ));

        assert!(Volume::parse((0..9).collect(), d).is_err());
    }

    #[test]
    fn slice_bounds() {
        let volume = fixture();
        assert!(volume.extract_slice(1).is_ok());
        assert!(volume.extract_slice(2).is_ok());
        assert!(matches!(
            volume.extract_slice(0),
            Err(Error::IndexOutOfRange { index: 0, min: 1, max: 2 })
        ));
        assert!(matches!(
            volume.extract_slice(3),
            Err(Error::IndexOutOfRange { index: 3, min: 1, max: 2 })
        ));
    }

    #[test]
    fn slice_content() {
        let volume = fixture();
        let slice = volume.extract_slice(2).unwrap();
        assert_eq!((slice.nx, slice.ny, slice.z), (2, 2, 1));
        assert_eq!(slice.codes(), &[3, 1, 2, 0]);
        assert_eq!(slice.get(1, 0), Some(2));
        assert_eq!(slice.get(2, 0), None);

        let rows = slice.rows().collect::<Vec<_>>();
        assert_eq!(rows, vec![&[3, 1][..], &[2, 0][..]]);
    }

    #[test]
    fn inverse_recovers_file_order() {
        let d = Dimensions::new(5, 3, 2);
        let raw: Vec<i64> = (0..30).map(|i| i * i % 13).collect();
        let volume = Volume::parse(raw.clone(), d).unwrap();
        assert_eq!(volume.to_raw_table().into_codes(), raw);
        assert_eq!(volume.flipped_cells(), raw);
    }

    #[test]
    fn flattened_column_keeps_volume_order() {
        let volume = fixture();
        let column = volume.to_flattened_column();
        assert_eq!(column.len(), 8);
        assert_eq!(column.values(), volume.codes());
    }

    #[test]
    fn code_range() {
        let volume = Volume::parse(vec![2, -1, 0, 5, 5, 2, 0, 0], Dimensions::new(2, 2, 2)).unwrap();
        assert_eq!(volume.max_code(), Some(5));
        assert_eq!(volume.min_code(), Some(-1));
        assert_eq!(volume.unique_codes(), vec![-1, 0, 2, 5]);
    }
}
