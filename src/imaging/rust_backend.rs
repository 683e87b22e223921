//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate, format sniffed from content |
//! | Flatten alpha / palette | [`flatten_onto`] (explicit blend onto the canvas color) |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Canvas paste | `image::imageops::replace` (overwrite, no blending) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` + JFIF pixel density |
//! | Encode → PNG | `png::Encoder`, best compression, adaptive filtering, `pHYs` chunk |
//!
//! Encoding happens into memory; the output file is only created once the
//! encode has succeeded, so a failed normalize never leaves a partial file.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Dpi, NormalizeParams, OutputFormat, Quality};
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::path::Path;
use std::sync::LazyLock;

/// Canvas background, also used when flattening transparency.
pub const CANVAS_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The decoder is picked from the file content, not the extension, so a PNG
/// saved as `.jpg` still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Convert any decoded image to opaque RGB8, blending alpha onto `background`.
///
/// Palette images arrive already expanded to RGB(A) by the decoder, so the
/// only transparency left to handle is a real alpha channel.
pub fn flatten_onto(img: DynamicImage, background: Rgb<u8>) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let [bg_r, bg_g, bg_b] = background.0;
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u32;
        let blend = |c: u8, bg: u8| ((c as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r, bg_r), blend(g, bg_g), blend(b, bg_b)])
    })
}

/// Build the finished canvas: flatten, resize to the placement, paste centered.
fn compose_canvas(img: DynamicImage, params: &NormalizeParams) -> Result<RgbImage, BackendError> {
    let placement = params.placement;
    if placement.is_degenerate() {
        return Err(BackendError::ProcessingFailed(format!(
            "resized image would be {}x{}",
            placement.width, placement.height
        )));
    }

    let rgb = flatten_onto(img, CANVAS_BACKGROUND);
    let resized = imageops::resize(&rgb, placement.width, placement.height, FilterType::Lanczos3);

    let mut canvas = RgbImage::from_pixel(params.canvas.width, params.canvas.height, CANVAS_BACKGROUND);
    imageops::replace(&mut canvas, &resized, placement.x as i64, placement.y as i64);
    Ok(canvas)
}

/// Encode as baseline JPEG with a JFIF density in dots per inch.
fn encode_jpeg(canvas: &RgbImage, quality: Quality, dpi: Dpi) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.value());
        encoder.set_pixel_density(PixelDensity::dpi(dpi.as_jfif()));
        encoder
            .encode_image(canvas)
            .map_err(|e| BackendError::Encode {
                format: "JPEG",
                message: e.to_string(),
            })?;
    }
    Ok(buf)
}

fn png_error(e: png::EncodingError) -> BackendError {
    BackendError::Encode {
        format: "PNG",
        message: e.to_string(),
    }
}

/// Encode as RGB8 PNG with maximum compression and a `pHYs` chunk.
fn encode_png(canvas: &RgbImage, dpi: Dpi) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);
        let ppm = dpi.pixels_per_meter();
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header().map_err(png_error)?;
        writer.write_image_data(canvas.as_raw()).map_err(png_error)?;
        writer.finish().map_err(png_error)?;
    }
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        Ok(Dimensions { width, height })
    }

    fn normalize(&self, params: &NormalizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let canvas = compose_canvas(img, params)?;

        let bytes = match params.format {
            OutputFormat::Jpeg => encode_jpeg(&canvas, params.canvas.quality, params.canvas.dpi)?,
            OutputFormat::Png => encode_png(&canvas, params.canvas.dpi)?,
        };
        std::fs::write(&params.output, bytes)?;
        Ok(())
    }
}
