// crate modules
use crate::vtk::VolumeToVtk;

// external crates
use vtkio::model::ByteOrder;

/// Builder implementation for [VolumeToVtk] configuration
///
/// ```rust
/// # use ftools_plot::vtk::VolumeToVtk;
/// # use vtkio::model::ByteOrder;
/// let converter = VolumeToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .cell_size([2.0, 2.0, 0.5])
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Cell edge lengths along x, y and z
    cell_size: [f64; 3],
}

impl VolumeToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [VolumeToVtk] type
    pub fn build(self) -> VolumeToVtk {
        VolumeToVtk {
            byte_order: self.byte_order,
            cell_size: self.cell_size,
        }
    }

    /// Set the byte ordering
    ///
    /// VisIt only reads big endian, even though most systems are little
    /// endian, so big endian is the default for convenience.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Cell edge lengths along x, y and z, unit cubes by default
    pub fn cell_size(mut self, size: [f64; 3]) -> Self {
        self.cell_size = size;
        self
    }
}

impl Default for VolumeToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            cell_size: [1.0, 1.0, 1.0],
        }
    }
}
