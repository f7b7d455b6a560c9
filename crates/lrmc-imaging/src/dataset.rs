//! Image stacks as row-stacked data matrices.
//!
//! Each image becomes one row of a D x N matrix (D images, N pixels),
//! which is the shape the completion solver works on. The width and
//! height are retained so any row can be reshaped back into an image;
//! that reshape is the exact inverse of the flattening.

use std::fs;
use std::path::{Path, PathBuf};

use lrmc_core::types::{DMatrix, Scalar};

use crate::error::{ImagingError, Result};
use crate::pgm::{read_pgm, GrayImage};

/// A stack of same-sized grayscale images flattened into a data matrix.
#[derive(Debug, Clone)]
pub struct ImageDataset<T: Scalar> {
    matrix: DMatrix<T>,
    width: usize,
    height: usize,
}

impl<T: Scalar> ImageDataset<T> {
    /// Build a dataset from in-memory images, one per matrix row.
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::Shape`] if the slice is empty or the
    /// images do not all share the same dimensions.
    pub fn from_images(images: &[GrayImage]) -> Result<Self> {
        let first = images
            .first()
            .ok_or_else(|| ImagingError::shape_error("dataset needs at least one image"))?;
        let (width, height) = (first.width(), first.height());

        for (index, image) in images.iter().enumerate() {
            if image.width() != width || image.height() != height {
                return Err(ImagingError::shape_error(format!(
                    "image {} is {}x{}, expected {}x{}",
                    index,
                    image.width(),
                    image.height(),
                    width,
                    height
                )));
            }
        }

        let matrix = DMatrix::from_fn(images.len(), width * height, |i, j| {
            <T as Scalar>::from_f64(images[i].samples()[j])
        });
        Ok(Self {
            matrix,
            width,
            height,
        })
    }

    /// Load every `.pgm` file in a directory, sorted by filename.
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::Io`] for filesystem failures,
    /// [`ImagingError::Format`] for malformed files and
    /// [`ImagingError::Shape`] if the directory holds no PGM images or
    /// their dimensions disagree.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_pgm = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pgm"));
            if is_pgm {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(ImagingError::shape_error("no PGM images in directory"));
        }

        let images = paths.iter().map(read_pgm).collect::<Result<Vec<_>>>()?;
        Self::from_images(&images)
    }

    /// The D x N data matrix.
    pub fn matrix(&self) -> &DMatrix<T> {
        &self.matrix
    }

    /// Consume the dataset, yielding the data matrix.
    pub fn into_matrix(self) -> DMatrix<T> {
        self.matrix
    }

    /// Number of images (rows).
    pub fn image_count(&self) -> usize {
        self.matrix.nrows()
    }

    /// Width of each image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of each image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reshape row `index` back into an image.
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::Shape`] if the row index is out of range.
    pub fn row_image(&self, index: usize) -> Result<GrayImage> {
        if index >= self.matrix.nrows() {
            return Err(ImagingError::shape_error(format!(
                "row {} out of range for {} images",
                index,
                self.matrix.nrows()
            )));
        }
        let samples = (0..self.matrix.ncols())
            .map(|j| self.matrix[(index, j)].to_f64())
            .collect();
        GrayImage::new(self.width, self.height, samples)
    }

    /// Pair another matrix (typically a completed estimate) with this
    /// dataset's image geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::Shape`] if the shapes disagree.
    pub fn with_matrix(&self, matrix: DMatrix<T>) -> Result<Self> {
        if matrix.shape() != self.matrix.shape() {
            return Err(ImagingError::shape_error(format!(
                "matrix is {:?}, expected {:?}",
                matrix.shape(),
                self.matrix.shape()
            )));
        }
        Ok(Self {
            matrix,
            width: self.width,
            height: self.height,
        })
    }
}
