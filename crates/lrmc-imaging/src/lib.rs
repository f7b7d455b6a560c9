//! Raster image frontend for low-rank matrix completion.
//!
//! Everything here is a thin, replaceable wrapper around the core
//! completion operators: loading PGM images into a row-stacked data
//! matrix, randomly corrupting entries for synthetic experiments, and
//! rendering original/corrupted/completed triples back out as images.
//!
//! - [`pgm`]: binary PGM reading and writing
//! - [`dataset`]: image stacks as D x N data matrices
//! - [`corruption`]: Bernoulli entry removal with its observation mask
//! - [`render`]: side-by-side comparison strips
//! - [`error`]: I/O and format error types

pub mod corruption;
pub mod dataset;
pub mod error;
pub mod pgm;
pub mod render;

pub use corruption::corrupt;
pub use dataset::ImageDataset;
pub use error::{ImagingError, Result};
pub use pgm::{read_pgm, write_pgm, GrayImage};
pub use render::comparison_strip;
