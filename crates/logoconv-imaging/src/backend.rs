// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backend seam in front of the image codecs.
//
// The runtime and handle only talk to an `ImageBackend`. `NativeBackend` is the
// real implementation over the `image` and `imageproc` crates. Backends are
// pure codecs: they turn patterns and bytes into images and images into bytes.
// Filesystem access lives in the handle.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{DynamicImage, GrayImage, ImageError, ImageFormat, Luma};
use logoconv_core::config::DEFAULT_JPEG_QUALITY;
use logoconv_core::error::{ConvertError, Result};
use logoconv_core::{BuiltinPattern, ConversionConfig, FailureCause, OutputFormat};
use tracing::{debug, info};

use crate::pattern;

/// Encoder settings passed to every store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl From<&ConversionConfig> for EncodeOptions {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            jpeg_quality: config.effective_jpeg_quality(),
        }
    }
}

/// Capabilities the conversion driver consumes from an image library.
///
/// `initialize` and `shutdown` are called exactly once each by
/// [`ImagingRuntime`](crate::runtime::ImagingRuntime); every other method is
/// only called between them.
pub trait ImageBackend {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Prepare the library for use.
    fn initialize(&mut self) -> Result<()>;

    /// Tear the library down.
    fn shutdown(&mut self) -> Result<()>;

    /// Render a built-in pattern without touching the filesystem.
    fn render_pattern(&self, pattern: BuiltinPattern) -> Result<DynamicImage>;

    /// Decode encoded image bytes. `origin` names the data in errors.
    fn decode(&self, data: &[u8], origin: &str) -> Result<DynamicImage>;

    /// Encode an image into `format`. `target` names the destination in errors.
    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        options: &EncodeOptions,
        target: &str,
    ) -> Result<Vec<u8>>;

    /// Called when the runtime hands out an image handle.
    fn on_handle_acquired(&self) {}

    /// Called when an image handle is released.
    fn on_handle_released(&self) {}
}

/// Classify an `image` crate error for diagnostics.
pub(crate) fn codec_cause(err: &ImageError) -> FailureCause {
    match err {
        ImageError::Unsupported(_) => FailureCause::Unsupported,
        ImageError::IoError(io) => FailureCause::from_io(io),
        _ => FailureCause::Codec,
    }
}

/// Backend over the `image` and `imageproc` crates.
#[derive(Debug, Default)]
pub struct NativeBackend {
    ready: bool,
}

impl NativeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Push a 2x2 sample through PGM encode, PGM decode, and JPEG encode.
    fn self_test(&self) -> Result<()> {
        let sample = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([128])));
        let options = EncodeOptions::default();
        let pgm = self.encode(&sample, OutputFormat::Pgm, &options, "sample.pgm")?;
        self.decode(&pgm, "sample.pgm")?;
        self.encode(&sample, OutputFormat::Jpeg, &options, "sample.jpg")?;
        Ok(())
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(ConvertError::Init("native backend used before initialisation".into()))
        }
    }
}

impl ImageBackend for NativeBackend {
    fn name(&self) -> &str {
        "image-rs"
    }

    fn initialize(&mut self) -> Result<()> {
        if self.ready {
            return Err(ConvertError::Init("native backend already initialised".into()));
        }
        // The self-test goes through the ready check.
        self.ready = true;
        if let Err(err) = self.self_test() {
            self.ready = false;
            return Err(ConvertError::Init(err.to_string()));
        }
        info!(backend = self.name(), "Native image backend ready");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if !self.ready {
            return Err(ConvertError::Teardown("native backend was not running".into()));
        }
        self.ready = false;
        debug!(backend = self.name(), "Native image backend stopped");
        Ok(())
    }

    fn render_pattern(&self, pattern: BuiltinPattern) -> Result<DynamicImage> {
        self.ensure_ready()?;
        Ok(pattern::render(pattern))
    }

    fn decode(&self, data: &[u8], origin: &str) -> Result<DynamicImage> {
        self.ensure_ready()?;
        let img = image::load_from_memory(data).map_err(|err| ConvertError::decode(origin, codec_cause(&err), err))?;
        debug!(
            origin,
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image decoded from bytes"
        );
        Ok(img)
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        options: &EncodeOptions,
        target: &str,
    ) -> Result<Vec<u8>> {
        self.ensure_ready()?;
        let mut buffer = Vec::new();
        let outcome = match format {
            OutputFormat::Pgm => {
                let encoder = PnmEncoder::new(&mut buffer)
                    .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
                image.to_luma8().write_with_encoder(encoder)
            }
            OutputFormat::Ppm => {
                let encoder = PnmEncoder::new(&mut buffer)
                    .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary));
                image.to_rgb8().write_with_encoder(encoder)
            }
            OutputFormat::Jpeg => {
                let encoder =
                    JpegEncoder::new_with_quality(&mut buffer, options.jpeg_quality.clamp(1, 100));
                // Grayscale sources stay single-channel.
                if image.color().has_color() {
                    image.to_rgb8().write_with_encoder(encoder)
                } else {
                    image.to_luma8().write_with_encoder(encoder)
                }
            }
            OutputFormat::Bmp => DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Bmp),
            OutputFormat::Png => image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png),
            OutputFormat::Tiff => image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Tiff),
        };
        outcome.map_err(|err| ConvertError::encode(target, codec_cause(&err), err))?;
        debug!(
            destination = target,
            format = format.mime_type(),
            bytes = buffer.len(),
            "Image encoded"
        );
        Ok(buffer)
    }
}
