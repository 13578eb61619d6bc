//! Result and Error types for ftools-plot

/// Type alias for `Result<T, plot::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `ftools-plot`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure in the facies volume, e.g. a slice out of range
    #[error(transparent)]
    Facies(#[from] ftools_facies::Error),

    /// Failed to encode or write an image
    #[error("failed image operation")]
    Image(#[from] image::ImageError),

    /// Failed to write a VTK file
    #[error("failed vtkio operation")]
    Vtkio(#[from] vtkio::Error),

    /// Colormap name is not one of the supported maps
    #[error("unknown colormap \"{0}\"")]
    UnknownColormap(String),

    /// Slice panel with nothing to plot
    #[error("no slices requested for the panel")]
    NoSlices,
}
