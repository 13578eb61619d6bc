// external crates
use serde::{Deserialize, Serialize};

/// Grid dimensions of a facies volume
///
/// Number of cells along each axis of the simulation grid. The defaults match
/// the common 256x256x128 training image size.
///
/// ```rust
/// # use ftools_facies::Dimensions;
/// let dimensions = Dimensions::default();
/// assert_eq!(dimensions.number_of_cells(), Some(256 * 256 * 128));
///
/// let dimensions = Dimensions::new(2, 3, 4);
/// assert_eq!(dimensions.number_of_cells(), Some(24));
///
/// // too many cells to count
/// assert_eq!(Dimensions::new(usize::MAX, 2, 1).number_of_cells(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of cells in x
    pub nx: usize,
    /// Number of cells in y
    pub ny: usize,
    /// Number of cells in z
    pub nz: usize,
}

impl Dimensions {
    /// Grid of `nx` x `ny` x `nz` cells
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of cells expected in a file, `None` if it overflows
    pub fn number_of_cells(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    /// Number of cells in a single z slice
    pub fn cells_per_slice(&self) -> usize {
        self.nx * self.ny
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            nx: 256,
            ny: 256,
            nz: 128,
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}
