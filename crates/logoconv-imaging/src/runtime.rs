// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scoped image runtime.
//
// Constructing an `ImagingRuntime` initialises the backend and `shutdown`
// consumes it, so the runtime cannot be used before start-up or after
// teardown. Handles borrow the runtime and cannot outlive it.

use std::cell::Cell;

use logoconv_core::error::{ConvertError, Result};
use tracing::{debug, info, instrument, warn};

use crate::backend::ImageBackend;
use crate::handle::ImageHandle;

/// Handle bookkeeping for a runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub handles_acquired: u64,
    pub handles_released: u64,
}

impl RuntimeStats {
    pub fn live_handles(&self) -> u64 {
        self.handles_acquired - self.handles_released
    }
}

/// Initialised image library. At most one [`ImageHandle`] is live at a time.
pub struct ImagingRuntime<B: ImageBackend> {
    backend: B,
    stats: Cell<RuntimeStats>,
    shut_down: bool,
}

impl<B: ImageBackend> ImagingRuntime<B> {
    /// Start the backend. Fails with [`ConvertError::Init`] if it cannot start.
    #[instrument(skip_all, fields(backend = backend.name()))]
    pub fn initialize(mut backend: B) -> Result<Self> {
        backend.initialize()?;
        info!("Image runtime initialised");
        Ok(Self {
            backend,
            stats: Cell::new(RuntimeStats::default()),
            shut_down: false,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn stats(&self) -> RuntimeStats {
        self.stats.get()
    }

    /// Hand out an empty image handle. Fails with
    /// [`ConvertError::HandleInUse`] while another handle is live.
    pub fn acquire_handle(&self) -> Result<ImageHandle<'_, B>> {
        let mut stats = self.stats.get();
        if stats.live_handles() > 0 {
            return Err(ConvertError::HandleInUse);
        }
        stats.handles_acquired += 1;
        self.stats.set(stats);
        self.backend.on_handle_acquired();
        debug!(acquired = stats.handles_acquired, "Image handle acquired");
        Ok(ImageHandle::new(self))
    }

    pub(crate) fn note_released(&self) {
        let mut stats = self.stats.get();
        stats.handles_released += 1;
        self.stats.set(stats);
        self.backend.on_handle_released();
        debug!(released = stats.handles_released, "Image handle released");
    }

    /// Tear the backend down. Called at most once; a runtime dropped without
    /// calling this tears itself down in `Drop`.
    #[instrument(skip_all, fields(backend = self.backend.name()))]
    pub fn shutdown(mut self) -> Result<()> {
        self.shut_down = true;
        self.backend.shutdown()?;
        info!("Image runtime shut down");
        Ok(())
    }
}

impl<B: ImageBackend> Drop for ImagingRuntime<B> {
    fn drop(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        warn!(backend = self.backend.name(), "Image runtime dropped without shutdown");
        if let Err(err) = self.backend.shutdown() {
            warn!(error = %err, "Image runtime teardown failed during drop");
        }
    }
}
