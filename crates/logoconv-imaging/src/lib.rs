// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logoconv-imaging — Image runtime and conversion driver.
//
// Provides the backend seam in front of the `image`/`imageproc` codecs, the
// built-in test patterns, the scoped runtime context, the single-owner image
// handle, and the load → store → reload → store driver.

pub mod backend;
pub mod driver;
pub mod handle;
pub mod integrity;
pub mod pattern;
pub mod runtime;

// Re-export the primary items so callers can use `logoconv_imaging::convert` etc.
pub use backend::{EncodeOptions, ImageBackend, NativeBackend};
pub use driver::{convert, convert_with, run_sequence};
pub use handle::ImageHandle;
pub use runtime::{ImagingRuntime, RuntimeStats};
