//! Facies volume reading, reorientation and conversion
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod dimensions;
mod error;
mod record;
mod table;
mod volume;

pub mod batch;
pub mod reader;
pub mod writer;

// inline the important types for a nice public API
#[doc(inline)]
pub use dimensions::Dimensions;

#[doc(inline)]
pub use table::RawTable;

#[doc(inline)]
pub use volume::{Slice2D, Volume};

#[doc(inline)]
pub use record::{FlattenedFacies, LabeledRecord};

#[doc(inline)]
pub use reader::{read_facies_file, FaciesFile, FaciesReader, GslibHeader};

#[doc(inline)]
pub use writer::{write_csv, write_mat, write_npy, write_outputs};

#[doc(inline)]
pub use batch::{list_output_files, BatchReader, BatchReaderBuilder, BatchSummary, FileReport, Outcome};

#[doc(inline)]
pub use error::{Error, Result};
