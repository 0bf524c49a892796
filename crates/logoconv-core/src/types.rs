// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for logoconv.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Synthetic images the runtime can render without touching the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinPattern {
    /// 640x480 colour test card. This is the pattern the driver loads.
    Logo,
    /// 70x46 radial colour swatch.
    Rose,
    /// 128x128 grey speckle texture.
    Granite,
}

impl BuiltinPattern {
    pub const ALL: [BuiltinPattern; 3] = [Self::Logo, Self::Rose, Self::Granite];

    /// Pixel dimensions (width, height) of the rendered pattern.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Logo => (640, 480),
            Self::Rose => (70, 46),
            Self::Granite => (128, 128),
        }
    }

    /// Pseudo-path spelling, e.g. `logo:`.
    pub fn pseudo_path(&self) -> &'static str {
        match self {
            Self::Logo => "logo:",
            Self::Rose => "rose:",
            Self::Granite => "granite:",
        }
    }

    /// Parse a pseudo-path. Only the exact `name:` form matches; anything with
    /// a directory component or extension is treated as a real file.
    pub fn from_pseudo_path(spec: &str) -> Option<Self> {
        let name = spec.strip_suffix(':')?;
        match name.to_ascii_lowercase().as_str() {
            "logo" => Some(Self::Logo),
            "rose" => Some(Self::Rose),
            "granite" => Some(Self::Granite),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuiltinPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pseudo_path())
    }
}

/// Formats the store operation can write, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Portable graymap, binary (`P5`).
    Pgm,
    /// Portable pixmap, binary (`P6`).
    Ppm,
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pgm => "image/x-portable-graymap",
            Self::Ppm => "image/x-portable-pixmap",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Infer the output format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pgm" => Some(Self::Pgm),
            "ppm" => Some(Self::Ppm),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Infer the output format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether the format can only hold a single luma channel.
    pub fn is_grayscale_only(&self) -> bool {
        matches!(self, Self::Pgm)
    }

    /// Whether the format can carry an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, Self::Png | Self::Tiff)
    }
}

/// Dimensions and colour layout of a decoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    /// Colour layout as reported by the decoder, e.g. `Rgb8` or `L8`.
    pub color: String,
}

impl ImageSummary {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A file written by a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub bytes: u64,
    /// SHA-256 of the bytes written, lowercase hex.
    pub sha256: String,
}

/// Outcome of one full load → store → reload → store run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub pattern: BuiltinPattern,
    pub source: ImageSummary,
    pub first: StoredFile,
    pub reloaded: ImageSummary,
    pub second: StoredFile,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ConversionReport {
    /// The single line printed when a run succeeds.
    pub fn completion_line(&self) -> String {
        format!(
            "Generated {} and {}",
            self.first.path.display(),
            self.second.path.display()
        )
    }
}
