//! Volume to VTK conversion for 3D viewers
//!
//! A [Volume] becomes a rectilinear grid of `nx` x `ny` x `nz` unit cells
//! with a single `facies` cell attribute, ready for ParaView, VisIt, etc...
//!
//! ```rust, no_run
//! # use ftools_plot::vtk::{write_vtk, VolumeToVtk, VtkFormat};
//! # use ftools_facies::{read_facies_file, Dimensions};
//! let file = read_facies_file("./runs/ti_001.out", Dimensions::default()).unwrap();
//!
//! let vtk = VolumeToVtk::new().convert(file.volume(), &file.case_id);
//! write_vtk(vtk, "./runs/ti_001_volume.vtr", VtkFormat::Xml).unwrap();
//! ```

mod builder;
mod convert;

#[doc(inline)]
pub use builder::VolumeToVtkBuilder;

#[doc(inline)]
pub use convert::VolumeToVtk;

// crate modules
use crate::error::Result;

// ftools modules
use ftools_facies::Volume;

// standard library
use std::path::Path;

// external crates
use clap::ValueEnum;
use log::debug;
use vtkio::model::{ByteOrder, Vtk};

/// Available VTK output formats
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum VtkFormat {
    /// XML rectilinear grid (`.vtr`)
    #[default]
    Xml,
    /// Legacy text format (`.vtk`)
    #[value(name = "ascii")]
    LegacyAscii,
    /// Legacy binary format (`.vtk`)
    #[value(name = "binary")]
    LegacyBinary,
}

impl VtkFormat {
    /// File extension expected for the format
    pub fn extension(&self) -> &'static str {
        match self {
            VtkFormat::Xml => "vtr",
            _ => "vtk",
        }
    }
}

/// Convert a [Volume] with the default configuration
pub fn volume_to_vtk(volume: &Volume, title: &str) -> Vtk {
    VolumeToVtk::default().convert(volume, title)
}

/// Write a Vtk to file in the chosen format
///
/// XML output is chosen by the file extension, so `path` should end in
/// `.vtr` for [VtkFormat::Xml]. Legacy binary files follow the byte order set
/// on the [Vtk].
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing {format:?} VTK to {}", path.display());

    match format {
        VtkFormat::Xml => vtk.export(path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(path)?,
        VtkFormat::LegacyBinary => match vtk.byte_order {
            ByteOrder::LittleEndian => vtk.export_le(path)?,
            ByteOrder::BigEndian => vtk.export_be(path)?,
        },
    }

    Ok(())
}
