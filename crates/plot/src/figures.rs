//! Figures written alongside a converted facies file

// crate modules
use crate::error::Result;
use crate::panel::SlicePanel;
use crate::vtk::{write_vtk, VolumeToVtk, VtkFormat};

// ftools modules
use ftools_facies::FaciesFile;
use ftools_utils::{f, PathExt};

// standard library
use std::path::PathBuf;

// external crates
use log::debug;

/// Everything needed to draw the figures for a file
///
/// ```rust, no_run
/// # use ftools_plot::{Figures, SlicePanel};
/// # use ftools_facies::{read_facies_file, Dimensions};
/// let file = read_facies_file("./runs/ti_001.out", Dimensions::default()).unwrap();
///
/// // ./runs/ti_001_slices.png, ./runs/ti_001_volume.vtr
/// let written = Figures::default().save(&file).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figures {
    /// Slice panel configuration
    pub panel: SlicePanel,
    /// Volume conversion configuration
    pub converter: VolumeToVtk,
    /// Format of the volume file
    pub format: VtkFormat,
}

impl Figures {
    /// Collect the figure configuration
    pub fn new(panel: SlicePanel, converter: VolumeToVtk, format: VtkFormat) -> Self {
        Self {
            panel,
            converter,
            format,
        }
    }

    /// Write `<case_id>_slices.png` and `<case_id>_volume.<ext>` next to the file
    ///
    /// The volume is a VTK rectilinear grid dataset, not an image.
    ///
    /// Returns the paths written, the slice panel first.
    pub fn save(&self, file: &FaciesFile) -> Result<Vec<PathBuf>> {
        let volume = file.volume();

        let png = file.path.sibling("_slices.png");
        self.panel.save(volume, &png)?;

        let vtk_path = file.path.sibling(&f!("_volume.{}", self.format.extension()));
        let vtk = self.converter.convert(volume, &file.case_id);
        write_vtk(vtk, &vtk_path, self.format)?;

        debug!("Figures written for {}", file.case_id);
        Ok(vec![png, vtk_path])
    }
}
