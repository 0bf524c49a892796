// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::BuiltinPattern;

/// Default JPEG quality, matching the usual ImageMagick default.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Built-in pattern loaded before the first store.
    pub pattern: BuiltinPattern,
    /// Destination of the first store (default `logo.pgm`).
    pub first_output: PathBuf,
    /// Destination of the second store (default `logo.jpg`).
    pub second_output: PathBuf,
    /// JPEG quality (1-100). Out-of-range values are clamped when encoding.
    pub jpeg_quality: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pattern: BuiltinPattern::Logo,
            first_output: PathBuf::from("logo.pgm"),
            second_output: PathBuf::from("logo.jpg"),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ConversionConfig {
    /// Rebase relative output paths onto `dir`. Absolute paths are kept.
    pub fn within(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if self.first_output.is_relative() {
            self.first_output = dir.join(&self.first_output);
        }
        if self.second_output.is_relative() {
            self.second_output = dir.join(&self.second_output);
        }
        self
    }

    /// JPEG quality clamped to the encoder's accepted range.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
