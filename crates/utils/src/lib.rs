//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, deriving a case name from an output file or counting the
//! facies codes in a volume are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod option_ext;
mod path_ext;
mod slice_ext;

// Flatten
pub use option_ext::OptionExt;
pub use path_ext::PathExt;
pub use slice_ext::SliceExt;
