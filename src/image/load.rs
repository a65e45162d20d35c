//! Image loading utilities.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageReader;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

use super::{GrayArray, IMAGE_EXTENSIONS};

/// Configuration for [`get_images_from_dir`].
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// Keep at most this many images. None for all.
    pub max_count: Option<usize>,

    /// Randomly permute the images before truncating.
    pub shuffle: bool,

    /// Random seed for reproducible shuffles. None for random.
    pub seed: Option<u64>,
}

/// Load every image in `dir` as 8-bit grayscale.
///
/// Only the top level of the directory is scanned. Files are matched by
/// extension against [`IMAGE_EXTENSIONS`], case-insensitively. Files that
/// fail to decode are skipped with a warning.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `dir` does not exist or is not a
/// directory, or [`Error::Io`] if it cannot be listed.
pub fn get_images_from_dir<P: AsRef<Path>>(dir: P, config: &LoadConfig) -> Result<Vec<GrayArray>> {
    let mut rng = config
        .seed
        .map_or_else(rand::rngs::StdRng::from_os_rng, rand::rngs::StdRng::seed_from_u64);

    get_images_from_dir_with_rng(dir, config.max_count, config.shuffle, &mut rng)
}

/// Like [`get_images_from_dir`], shuffling with the given random source.
///
/// # Errors
///
/// Same as [`get_images_from_dir`].
pub fn get_images_from_dir_with_rng<P, R>(
    dir: P,
    max_count: Option<usize>,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<GrayArray>>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let paths = list_image_files(dir)?;

    let mut images: Vec<GrayArray> = paths
        .iter()
        .filter_map(|path| match load_grayscale(path) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!("Skipping {err}");
                None
            }
        })
        .collect();

    if shuffle {
        images.shuffle(rng);
    }

    if let Some(max_count) = max_count {
        images.truncate(max_count);
    }

    tracing::debug!("Loaded {} of {} image files", images.len(), paths.len());

    Ok(images)
}

/// List the image files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into and are never listed, whatever
/// their name.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `dir` does not exist or is not a
/// directory, or [`Error::Io`] if it cannot be listed.
pub fn list_image_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    tracing::debug!("Found {} image files in {}", paths.len(), dir.display());

    Ok(paths)
}

/// Whether the path's extension is one of [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Decode an image file and collapse it to a single 8-bit channel.
///
/// The format is sniffed from the file contents, falling back to the
/// extension.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file cannot be read or decoded.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<GrayArray> {
    let path = path.as_ref();
    let load_err = |source: image::ImageError| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(|err| load_err(image::ImageError::IoError(err)))?
        .with_guessed_format()
        .map_err(|err| load_err(image::ImageError::IoError(err)))?
        .decode()
        .map_err(load_err)?;

    let gray = img.into_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);

    Array2::from_shape_vec((height, width), gray.into_raw()).map_err(|err| {
        Error::UnsupportedShape {
            shape: vec![height, width],
            reason: err.to_string(),
        }
    })
}
