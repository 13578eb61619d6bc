//! `ftools` is a small toolkit for converting and plotting simulated facies
//! volumes
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use ftools_utils as utils;

#[cfg(feature = "facies")]
#[cfg_attr(docsrs, doc(cfg(feature = "facies")))]
#[doc(inline)]
pub use ftools_facies as facies;

#[cfg(feature = "plot")]
#[cfg_attr(docsrs, doc(cfg(feature = "plot")))]
#[doc(inline)]
pub use ftools_plot as plot;
