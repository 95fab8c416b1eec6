//! # Image Normalization and Decoding
//!
//! Hotel photos arrive as data URIs in whatever format was uploaded. The
//! PDF writer embeds exactly two formats natively: JPEG (DCTDecode) and
//! PNG (decoded to RGB + alpha SMask). Anything else is decoded and
//! re-encoded as JPEG before it reaches the layout engine, so a
//! [`NormalizedImage`] always carries a format tag the writer accepts and
//! that matches its bytes.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageEncoder};

use crate::error::{Result, StaysheetError};

/// JPEG quality used when converting non-native formats.
pub const CONVERSION_QUALITY: u8 = 90;

/// Formats the PDF writer embeds without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfImageFormat {
    Jpeg,
    Png,
}

impl PdfImageFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }
}

/// An image in a format the PDF writer accepts natively.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub format: PdfImageFormat,
    pub data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Normalize a data URI (or bare base64) for embedding.
///
/// PNG and JPEG sources whose bytes agree with the declared MIME type pass
/// through untouched. Every other source is decoded and re-encoded as JPEG.
pub fn normalize_for_pdf(src: &str) -> Result<NormalizedImage> {
    let mime = declared_mime(src);
    let bytes = read_source_bytes(src)?;

    let passthrough = match mime.as_str() {
        "image/png" if is_png(&bytes) => Some(PdfImageFormat::Png),
        "image/jpeg" | "image/jpg" if is_jpeg(&bytes) => Some(PdfImageFormat::Jpeg),
        _ => None,
    };

    match passthrough {
        Some(format) => {
            let (width_px, height_px) = read_dimensions(&bytes)?;
            Ok(NormalizedImage {
                format,
                data: bytes,
                width_px,
                height_px,
            })
        }
        None => {
            log::debug!("converting {} image to JPEG", mime);
            convert_to_jpeg(&bytes)
        }
    }
}

/// Async wrapper around [`normalize_for_pdf`]. Decoding and re-encoding
/// run on the blocking pool so the runtime thread stays free.
pub async fn normalize_image(src: String) -> Result<NormalizedImage> {
    tokio::task::spawn_blocking(move || normalize_for_pdf(&src))
        .await
        .map_err(|e| StaysheetError::ImageError(format!("Image conversion task failed: {}", e)))?
}

/// The MIME type declared by a data URI, lowercased. Bare base64 counts
/// as JPEG.
pub fn declared_mime(src: &str) -> String {
    src.strip_prefix("data:")
        .and_then(|rest| rest.split(|c: char| c == ';' || c == ',').next())
        .filter(|m| !m.is_empty())
        .map(|m| m.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "image/jpeg".to_string())
}

/// Resolve the source string to raw image bytes.
fn read_source_bytes(src: &str) -> Result<Vec<u8>> {
    // Data URI: data:image/png;base64,iVBOR...
    if src.starts_with("data:") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| StaysheetError::ImageError("Invalid data URI: missing comma".to_string()))?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| StaysheetError::ImageError(format!("Base64 decode error: {}", e)))
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
}

/// Read pixel dimensions without decoding the pixels.
fn read_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| StaysheetError::ImageError(format!("Format detection error: {}", e)))?
        .into_dimensions()
        .map_err(|e| StaysheetError::ImageError(format!("Failed to read dimensions: {}", e)))
}

/// Decode any supported format, flatten to RGB and encode as JPEG.
fn convert_to_jpeg(data: &[u8]) -> Result<NormalizedImage> {
    let img = image::load_from_memory(data)
        .map_err(|e| StaysheetError::ImageError(format!("Failed to decode image: {}", e)))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, CONVERSION_QUALITY)
        .write_image(rgb.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| StaysheetError::ImageError(format!("Failed to encode JPEG: {}", e)))?;

    Ok(NormalizedImage {
        format: PdfImageFormat::Jpeg,
        data: buf,
        width_px: width,
        height_px: height,
    })
}

/// A fully decoded/loaded image ready for PDF embedding.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixel_data: ImagePixelData,
    pub width_px: u32,
    pub height_px: u32,
}

/// The pixel data in a format the PDF serializer can consume directly.
#[derive(Debug, Clone)]
pub enum ImagePixelData {
    /// Raw JPEG bytes, embedded directly with DCTDecode.
    Jpeg {
        data: Vec<u8>,
        color_space: JpegColorSpace,
    },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes (grayscale alpha). None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
}

/// Prepare a normalized image for the PDF writer.
pub fn load_for_embedding(image: &NormalizedImage) -> Result<LoadedImage> {
    match image.format {
        PdfImageFormat::Jpeg => Ok(LoadedImage {
            pixel_data: ImagePixelData::Jpeg {
                data: image.data.clone(),
                color_space: detect_jpeg_color_space(&image.data),
            },
            width_px: image.width_px,
            height_px: image.height_px,
        }),
        PdfImageFormat::Png => decode_png(&image.data),
    }
}

/// Scan JPEG markers to find the SOF (Start of Frame) segment and read
/// the number of components to determine color space.
fn detect_jpeg_color_space(data: &[u8]) -> JpegColorSpace {
    let mut i = 2; // skip SOI marker (FF D8)
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        // SOF markers: C0-C3, C5-C7, C9-CB, CD-CF
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof && i + 9 < data.len() {
            // length(2) + precision(1) + height(2) + width(2) + num_components(1)
            return if data[i + 9] == 1 {
                JpegColorSpace::DeviceGray
            } else {
                JpegColorSpace::DeviceRGB
            };
        }
        if i + 3 < data.len() {
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + seg_len;
        } else {
            break;
        }
    }
    JpegColorSpace::DeviceRGB
}

/// PNG: decode to RGBA, split into RGB + alpha.
fn decode_png(data: &[u8]) -> Result<LoadedImage> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .map_err(|e| StaysheetError::ImageError(format!("Failed to decode PNG: {}", e)))?;

    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    let pixel_count = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel[3]);
        if pixel[3] != 255 {
            has_transparency = true;
        }
    }

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Decoded {
            rgb,
            alpha: if has_transparency { Some(alpha) } else { None },
        },
        width_px: width,
        height_px: height,
    })
}
