//! Exhibit image loading.
//!
//! JPEG files are embedded unchanged with the DCTDecode filter. Every other
//! format `image` can decode is converted to 8-bit gray or RGB samples and
//! stored Flate-compressed.

use image::{ColorType, DynamicImage, ImageError, ImageFormat};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Image data ready to become a PDF image XObject.
#[derive(Debug, Clone)]
pub(crate) struct ExhibitImage {
    pub width: u32,
    pub height: u32,
    pub gray: bool,
    /// Original file bytes when `passthrough`, raw samples otherwise.
    pub data: Vec<u8>,
    pub passthrough: bool,
}

impl ExhibitImage {
    /// Read and decode an image file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| Error::ImageLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(path, data)
    }

    /// Decode image bytes; `path` is only used in error messages.
    pub fn from_bytes(path: &Path, data: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&data).map_err(|e| image_error(path, e))?;
        let decoded =
            image::load_from_memory_with_format(&data, format).map_err(|e| image_error(path, e))?;
        let (width, height) = (decoded.width(), decoded.height());
        let gray = is_gray(&decoded);

        if format == ImageFormat::Jpeg {
            return Ok(Self {
                width,
                height,
                gray,
                data,
                passthrough: true,
            });
        }

        let samples = if gray {
            decoded.into_luma8().into_raw()
        } else {
            decoded.into_rgb8().into_raw()
        };
        Ok(Self {
            width,
            height,
            gray,
            data: samples,
            passthrough: false,
        })
    }

    /// PDF colour space name.
    pub fn color_space(&self) -> &'static [u8] {
        if self.gray {
            b"DeviceGray"
        } else {
            b"DeviceRGB"
        }
    }
}

/// Pixel dimensions read from the image header.
pub(crate) fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|e| image_error(path, e))
}

fn is_gray(image: &DynamicImage) -> bool {
    matches!(
        image.color(),
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16
    )
}

fn image_error(path: &Path, err: ImageError) -> Error {
    match err {
        ImageError::Unsupported(e) => {
            Error::UnsupportedImage(format!("{} ({})", path.display(), e))
        }
        other => Error::ImageLoad {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
