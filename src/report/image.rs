//! Slip image decoding and fit-to-page scaling.
//!
//! The decode path is picked from the storage path extension: `.png` goes
//! through the PNG decoder, anything else through the JPEG decoder. PDF and
//! WEBP slips therefore fail to decode and are skipped by the assembler.

use image::codecs::jpeg::JpegDecoder;
use image::{DynamicImage, ExtendedColorType, ImageDecoder};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".png") {
            ImageFormat::Png
        } else {
            ImageFormat::Jpeg
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// Original JPEG stream, embedded untouched.
    Dct { data: Vec<u8>, gray: bool },
    /// 8-bit RGB samples, plus alpha samples when any pixel is translucent.
    Raster { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

/// A slip image ready to be handed to [`crate::render::Surface::embed_image`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: PixelData,
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("could not decode {format:?} image: {source}")]
    Decode {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no pixels")]
    Empty,
}

pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, EmbedError> {
    let img = match format {
        ImageFormat::Png => decode_png(bytes),
        ImageFormat::Jpeg => decode_jpeg(bytes),
    }
    .map_err(|source| EmbedError::Decode { format, source })?;

    if img.width == 0 || img.height == 0 {
        return Err(EmbedError::Empty);
    }
    Ok(img)
}

fn decode_png(bytes: &[u8]) -> Result<DecodedImage, image::ImageError> {
    let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
    Ok(raster(decoded))
}

fn decode_jpeg(bytes: &[u8]) -> Result<DecodedImage, image::ImageError> {
    let decoder = JpegDecoder::new(Cursor::new(bytes))?;
    let original = decoder.original_color_type();
    // Full decode even for passthrough: a truncated file must fail here.
    let decoded = DynamicImage::from_decoder(decoder)?;

    let gray = match original {
        ExtendedColorType::L8 => true,
        ExtendedColorType::Rgb8 => false,
        // CMYK and friends are not passed through.
        _ => return Ok(raster(decoded)),
    };

    Ok(DecodedImage {
        width: decoded.width(),
        height: decoded.height(),
        pixels: PixelData::Dct {
            data: bytes.to_vec(),
            gray,
        },
    })
}

fn raster(decoded: DynamicImage) -> DecodedImage {
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let translucent = rgba.pixels().any(|p| p.0[3] < u8::MAX);

    let rgb = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let alpha = translucent.then(|| rgba.pixels().map(|p| p.0[3]).collect());

    DecodedImage {
        width,
        height,
        pixels: PixelData::Raster { rgb, alpha },
    }
}

/// Scale that makes `(img_w, img_h)` fit `(max_w, max_h)` keeping aspect ratio.
/// Small images are scaled up as well.
pub fn fit_scale(img_w: f32, img_h: f32, max_w: f32, max_h: f32) -> f32 {
    (max_w / img_w).min(max_h / img_h)
}
