// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion driver.
//
// Sequence: initialise → acquire handle → load test pattern → store first
// output → reload first output → store second output → release → shut down.
// Every step is fail-fast. The handle is released on every path, and a
// teardown failure is logged without masking the sequence's own outcome.

use chrono::Utc;
use logoconv_core::error::Result;
use logoconv_core::{ConversionConfig, ConversionReport};
use tracing::{info, instrument, warn};

use crate::backend::{EncodeOptions, ImageBackend, NativeBackend};
use crate::integrity::verify_stored;
use crate::runtime::ImagingRuntime;

/// Run the full conversion with the native backend.
pub fn convert(config: &ConversionConfig) -> Result<ConversionReport> {
    convert_with(NativeBackend::new(), config)
}

/// Run the full conversion with any backend: initialise once, run the
/// sequence, shut down once.
#[instrument(skip_all, fields(backend = backend.name()))]
pub fn convert_with<B: ImageBackend>(
    backend: B,
    config: &ConversionConfig,
) -> Result<ConversionReport> {
    let runtime = ImagingRuntime::initialize(backend)?;
    let outcome = run_sequence(&runtime, config);
    if let Err(err) = runtime.shutdown() {
        warn!(error = %err, "Image runtime teardown failed");
    }
    outcome
}

/// Steps 2-7 against an already-initialised runtime.
#[instrument(skip_all, fields(
    first = %config.first_output.display(),
    second = %config.second_output.display()
))]
pub fn run_sequence<B: ImageBackend>(
    runtime: &ImagingRuntime<B>,
    config: &ConversionConfig,
) -> Result<ConversionReport> {
    let started_at = Utc::now();
    let options = EncodeOptions::from(config);

    let mut handle = runtime.acquire_handle()?;

    let source = handle.load_pattern(config.pattern)?;
    info!(step = "load", pattern = %config.pattern, "Test pattern loaded");

    let first = handle.store_to_path_with(&config.first_output, &options)?;
    verify_stored(&first)?;
    info!(step = "store", path = %first.path.display(), "First output written");

    let reloaded = handle.load_from_path(&config.first_output)?;
    info!(step = "reload", path = %first.path.display(), "First output re-decoded");

    let second = handle.store_to_path_with(&config.second_output, &options)?;
    verify_stored(&second)?;
    info!(step = "store", path = %second.path.display(), "Second output written");

    handle.release();

    Ok(ConversionReport {
        pattern: config.pattern,
        source,
        first,
        reloaded,
        second,
        started_at,
        finished_at: Utc::now(),
    })
}
