//! Plotting of facies volumes
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod colormap;
mod error;
mod figures;
mod panel;

pub mod vtk;

// inline the important types for a nice public API
#[doc(inline)]
pub use colormap::{Colormap, LookupTable};

#[doc(inline)]
pub use panel::{SlicePanel, SlicePanelBuilder, DEFAULT_SLICES};

#[doc(inline)]
pub use figures::Figures;

#[doc(inline)]
pub use vtk::{volume_to_vtk, write_vtk, VolumeToVtk, VtkFormat};

#[doc(inline)]
pub use error::{Error, Result};
