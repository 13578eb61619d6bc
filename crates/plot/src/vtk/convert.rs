// standard library
use std::ops::RangeInclusive;

// ftools modules
use ftools_facies::{Dimensions, Volume};

// internal modules
use crate::vtk::VolumeToVtkBuilder;

// external crates
use vtkio::model::{
    Attribute, Attributes, ByteOrder, Coordinates, DataArray, DataSet, ElementType, Extent,
    IOBuffer, RangeExtent, RectilinearGridPiece, Version, Vtk,
};

/// Convert facies volumes to a VTK rectilinear grid
///
/// Every cell of the grid holds one facies code. Cells are written with x
/// varying fastest as VTK expects, taken from
/// [Volume::flipped_cells()](ftools_facies::Volume::flipped_cells), i.e. the
/// volume with its flip undone.
///
/// The fields remain public for direct use, but a builder is also
/// implemented.
///
/// ```rust
/// # use ftools_plot::vtk::VolumeToVtk;
/// # use ftools_facies::{Dimensions, Volume};
/// let volume = Volume::parse((0..24).collect(), Dimensions::new(4, 3, 2)).unwrap();
/// let vtk = VolumeToVtk::new().convert(&volume, "example");
/// assert_eq!(vtk.title, "example");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Cell edge lengths along x, y and z
    pub cell_size: [f64; 3],
}

impl VolumeToVtk {
    /// Start with the default configuration
    pub fn new() -> VolumeToVtk {
        Default::default()
    }

    /// Get an instance of the [VolumeToVtkBuilder]
    pub fn builder() -> VolumeToVtkBuilder {
        VolumeToVtkBuilder::default()
    }

    /// Convert a [Volume] to a vtkio::Vtk object
    pub fn convert(&self, volume: &Volume, title: &str) -> Vtk {
        let dimensions = volume.dimensions();
        Vtk {
            version: Version::Auto,
            title: title.to_string(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::inline(RectilinearGridPiece {
                extent: Self::extent(&dimensions),
                coords: self.coordinates(&dimensions),
                data: Self::attributes(volume),
            }),
        }
    }
}

impl Default for VolumeToVtk {
    fn default() -> Self {
        VolumeToVtkBuilder::default().build()
    }
}

impl VolumeToVtk {
    /// Number of cells along each axis
    fn extent(dimensions: &Dimensions) -> Extent {
        let range_ext: RangeExtent = [
            RangeInclusive::new(0, dimensions.nx as i32),
            RangeInclusive::new(0, dimensions.ny as i32),
            RangeInclusive::new(0, dimensions.nz as i32),
        ];
        Extent::Ranges(range_ext)
    }

    /// Cell boundaries from the origin
    fn coordinates(&self, dimensions: &Dimensions) -> Coordinates {
        let [dx, dy, dz] = self.cell_size;
        Coordinates {
            x: IOBuffer::F64(Self::bounds(dimensions.nx, dx)),
            y: IOBuffer::F64(Self::bounds(dimensions.ny, dy)),
            z: IOBuffer::F64(Self::bounds(dimensions.nz, dz)),
        }
    }

    fn bounds(cells: usize, size: f64) -> Vec<f64> {
        (0..=cells).map(|i| i as f64 * size).collect()
    }

    /// Single `facies` scalar per cell
    fn attributes(volume: &Volume) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.cell.push(Attribute::DataArray(DataArray {
            name: "facies".to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::I64(volume.flipped_cells()),
        }));
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtkio::model::Piece;

    /// The one inline piece of a rectilinear grid
    fn grid_piece(vtk: Vtk) -> RectilinearGridPiece {
        let DataSet::RectilinearGrid { mut pieces, .. } = vtk.data else {
            panic!("expected a rectilinear grid");
        };

        match pieces.remove(0) {
            Piece::Inline(piece) => *piece,
            _ => panic!("expected an inline piece"),
        }
    }

    fn volume() -> Volume {
        Volume::parse((0..24).collect(), Dimensions::new(4, 3, 2)).unwrap()
    }

    #[test]
    fn grid_layout() {
        let converter = VolumeToVtk::builder().cell_size([1.0, 2.0, 0.5]).build();
        let piece = grid_piece(converter.convert(&volume(), "case"));
        assert_eq!(piece.extent, Extent::Ranges([0..=4, 0..=3, 0..=2]));

        match (&piece.coords.x, &piece.coords.y, &piece.coords.z) {
            (IOBuffer::F64(x), IOBuffer::F64(y), IOBuffer::F64(z)) => {
                assert_eq!(x, &vec![0.0, 1.0, 2.0, 3.0, 4.0]);
                assert_eq!(y, &vec![0.0, 2.0, 4.0, 6.0]);
                assert_eq!(z, &vec![0.0, 0.5, 1.0]);
            }
            _ => panic!("expected f64 coordinates"),
        }
    }

    #[test]
    fn cell_data_in_file_order() {
        let piece = grid_piece(VolumeToVtk::new().convert(&volume(), "case"));
        assert_eq!(piece.data.cell.len(), 1);

        match &piece.data.cell[0] {
            Attribute::DataArray(array) => {
                assert_eq!(array.name, "facies");
                assert_eq!(array.data, IOBuffer::I64((0..24).collect()));
            }
            _ => panic!("expected a data array"),
        }
    }

    #[test]
    fn default_byte_order() {
        assert_eq!(VolumeToVtk::default().byte_order, ByteOrder::BigEndian);
    }
}
