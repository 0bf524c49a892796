// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image handle — the single in-memory image owned by the driver. Loads replace
// its contents, stores encode them to a file chosen by extension.

use std::fmt;
use std::path::Path;

use image::DynamicImage;
use logoconv_core::error::{ConvertError, Result};
use logoconv_core::{BuiltinPattern, FailureCause, ImageSummary, OutputFormat, StoredFile};
use tracing::{debug, info, instrument};

use crate::backend::{EncodeOptions, ImageBackend};
use crate::integrity::hash_bytes;
use crate::runtime::ImagingRuntime;

/// Exclusive owner of one decoded image.
///
/// Obtained from [`ImagingRuntime::acquire_handle`]. Released exactly once,
/// either explicitly with [`ImageHandle::release`] or when dropped on an
/// error path.
pub struct ImageHandle<'rt, B: ImageBackend> {
    runtime: &'rt ImagingRuntime<B>,
    /// The current image, `None` until the first successful load.
    image: Option<DynamicImage>,
    /// Where the current image came from (path or pseudo-path).
    origin: Option<String>,
}

impl<'rt, B: ImageBackend> ImageHandle<'rt, B> {
    pub(crate) fn new(runtime: &'rt ImagingRuntime<B>) -> Self {
        Self {
            runtime,
            image: None,
            origin: None,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    /// Current image dimensions, if loaded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| (img.width(), img.height()))
    }

    pub fn summary(&self) -> Option<ImageSummary> {
        self.image.as_ref().map(summarize)
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    // -- Loads (replace contents on success, keep them on failure) -------------

    /// Load the built-in logo test card.
    pub fn load_test_image(&mut self) -> Result<ImageSummary> {
        self.load_pattern(BuiltinPattern::Logo)
    }

    /// Load any built-in pattern.
    #[instrument(skip(self))]
    pub fn load_pattern(&mut self, pattern: BuiltinPattern) -> Result<ImageSummary> {
        let img = self.runtime.backend().render_pattern(pattern)?;
        Ok(self.replace(img, pattern.pseudo_path().to_owned()))
    }

    /// Decode the file at `path`. A pseudo-path such as `logo:` loads that
    /// built-in pattern instead.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<ImageSummary> {
        let path = path.as_ref();
        if let Some(pattern) = path.to_str().and_then(BuiltinPattern::from_pseudo_path) {
            return self.load_pattern(pattern);
        }

        let origin = path.display().to_string();
        let data = std::fs::read(path)
            .map_err(|err| ConvertError::decode(&origin, FailureCause::from_io(&err), err))?;
        let img = self.runtime.backend().decode(&data, &origin)?;
        Ok(self.replace(img, origin))
    }

    fn replace(&mut self, img: DynamicImage, origin: String) -> ImageSummary {
        let summary = summarize(&img);
        info!(
            origin = %origin,
            width = summary.width,
            height = summary.height,
            color = %summary.color,
            "Image loaded"
        );
        self.image = Some(img);
        self.origin = Some(origin);
        summary
    }

    // -- Stores ---------------------------------------------------------------

    /// Encode to `path` with default encoder settings.
    pub fn store_to_path(&self, path: impl AsRef<Path>) -> Result<StoredFile> {
        self.store_to_path_with(path, &EncodeOptions::default())
    }

    /// Encode to `path`, creating or overwriting it. The format follows the
    /// extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn store_to_path_with(
        &self,
        path: impl AsRef<Path>,
        options: &EncodeOptions,
    ) -> Result<StoredFile> {
        let path = path.as_ref();
        let target = path.display().to_string();

        let img = self.image.as_ref().ok_or_else(|| {
            ConvertError::encode(&target, FailureCause::Empty, "image handle is empty")
        })?;
        let format = OutputFormat::from_path(path).ok_or_else(|| {
            ConvertError::encode(&target, FailureCause::Unsupported, "unsupported output format")
        })?;

        let data = self.runtime.backend().encode(img, format, options, &target)?;
        std::fs::write(path, &data)
            .map_err(|err| ConvertError::encode(&target, FailureCause::from_io(&err), err))?;

        let stored = StoredFile {
            path: path.to_path_buf(),
            format,
            bytes: data.len() as u64,
            sha256: hash_bytes(&data),
        };
        info!(
            format = format.mime_type(),
            bytes = stored.bytes,
            "Image stored"
        );
        Ok(stored)
    }

    /// Release the handle. Equivalent to dropping it.
    pub fn release(self) {
        debug!(origin = ?self.origin, "Releasing image handle");
    }
}

impl<B: ImageBackend> fmt::Debug for ImageHandle<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("origin", &self.origin)
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

impl<B: ImageBackend> Drop for ImageHandle<'_, B> {
    fn drop(&mut self) {
        self.image = None;
        self.runtime.note_released();
    }
}

fn summarize(img: &DynamicImage) -> ImageSummary {
    ImageSummary {
        width: img.width(),
        height: img.height(),
        color: format!("{:?}", img.color()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeBackend;
    use logoconv_core::ErrorKind;

    fn runtime() -> ImagingRuntime<NativeBackend> {
        ImagingRuntime::initialize(NativeBackend::new()).unwrap()
    }

    #[test]
    fn new_handle_is_empty() {
        let rt = runtime();
        let handle = rt.acquire_handle().unwrap();
        assert!(handle.is_empty());
        assert_eq!(handle.dimensions(), None);
        assert_eq!(handle.origin(), None);
    }

    #[test]
    fn test_image_is_the_logo() {
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        let summary = handle.load_test_image().unwrap();
        assert_eq!(summary.dimensions(), (640, 480));
        assert_eq!(handle.origin(), Some("logo:"));
    }

    #[test]
    fn pgm_round_trip_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.pgm");
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();

        let source = handle.load_test_image().unwrap();
        let stored = handle.store_to_path(&path).unwrap();
        assert_eq!(stored.format, OutputFormat::Pgm);
        assert_eq!(stored.bytes, std::fs::metadata(&path).unwrap().len());

        let reloaded = handle.load_from_path(&path).unwrap();
        assert_eq!(reloaded.dimensions(), source.dimensions());
        assert_eq!(reloaded.color, "L8");
    }

    #[test]
    fn missing_file_is_decode_error_and_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        handle.load_pattern(BuiltinPattern::Rose).unwrap();

        let err = handle.load_from_path(dir.path().join("nope.pgm")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.cause(), Some(FailureCause::Missing));
        assert_eq!(handle.dimensions(), Some((70, 46)));
        assert_eq!(handle.origin(), Some("rose:"));
    }

    #[test]
    fn pseudo_path_loads_builtin() {
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        let summary = handle.load_from_path("granite:").unwrap();
        assert_eq!(summary.dimensions(), (128, 128));
    }

    #[test]
    fn storing_empty_handle_is_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        let rt = runtime();
        let handle = rt.acquire_handle().unwrap();

        let err = handle.store_to_path(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert_eq!(err.cause(), Some(FailureCause::Empty));
        assert!(!path.exists());
    }

    #[test]
    fn unknown_extension_is_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.xyz");
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        handle.load_test_image().unwrap();

        let err = handle.store_to_path(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert_eq!(err.cause(), Some(FailureCause::Unsupported));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_destination_is_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("logo.pgm");
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        handle.load_test_image().unwrap();

        let err = handle.store_to_path(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
    }

    #[test]
    fn store_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"stale").unwrap();
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        handle.load_pattern(BuiltinPattern::Rose).unwrap();

        handle.store_to_path(&path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"\x89PNG"));
    }

    #[test]
    fn debug_output_shows_origin_and_dimensions() {
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        assert_eq!(
            format!("{handle:?}"),
            "ImageHandle { origin: None, dimensions: None }"
        );

        handle.load_pattern(BuiltinPattern::Rose).unwrap();
        assert_eq!(
            format!("{handle:?}"),
            "ImageHandle { origin: Some(\"rose:\"), dimensions: Some((70, 46)) }"
        );
    }

    #[test]
    fn directory_in_the_way_is_an_io_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.pgm");
        std::fs::create_dir(&path).unwrap();
        let rt = runtime();
        let mut handle = rt.acquire_handle().unwrap();
        handle.load_test_image().unwrap();

        let err = handle.store_to_path(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert_eq!(err.cause(), Some(FailureCause::Io));
    }

    #[test]
    fn release_is_counted_once() {
        let rt = runtime();
        let handle = rt.acquire_handle().unwrap();
        handle.release();
        assert_eq!(rt.stats().handles_released, 1);
        assert_eq!(rt.stats().live_handles(), 0);
    }
}
