//! Loading the block image

use std::fmt;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{ImageError, RgbaImage};

/// Read the image at `path` and scale it to a `size` x `size` RGBA square
pub fn load_block_image(path: impl AsRef<Path>, size: u32) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    if size == 0 {
        return Err(AssetError::ZeroSize);
    }

    let image = image::open(path).map_err(|err| AssetError::from_image(path, err))?;
    log::debug!(
        "Loaded {} ({}x{}), scaling to {}x{}",
        path.display(),
        image.width(),
        image.height(),
        size,
        size
    );

    Ok(image.resize_exact(size, size, FilterType::Triangle).to_rgba8())
}

/// Asset loading failures
#[derive(Debug)]
pub enum AssetError {
    /// The file could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// The file was read but is not a supported image
    Decode { path: PathBuf, message: String },
    /// A zero block size was requested
    ZeroSize,
}

impl AssetError {
    fn from_image(path: &Path, err: ImageError) -> Self {
        match err {
            ImageError::IoError(source) => AssetError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => AssetError::Decode {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            AssetError::Decode { path, message } => {
                write!(f, "Failed to decode {}: {}", path.display(), message)
            }
            AssetError::ZeroSize => write!(f, "Block size must be greater than zero"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
