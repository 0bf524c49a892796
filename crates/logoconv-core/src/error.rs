// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for logoconv.

use thiserror::Error;

/// Top-level error type for every runtime, handle, and driver operation.
#[derive(Debug, Error)]
pub enum ConvertError {
    // -- Runtime lifecycle --
    #[error("image runtime failed to start: {0}")]
    Init(String),

    #[error("image runtime failed to shut down cleanly: {0}")]
    Teardown(String),

    #[error("an image handle is already live on this runtime")]
    HandleInUse,

    // -- Load / store --
    #[error("failed to decode {origin}: {reason}")]
    Decode {
        origin: String,
        cause: FailureCause,
        reason: String,
    },

    #[error("failed to encode {target}: {reason}")]
    Encode {
        target: String,
        cause: FailureCause,
        reason: String,
    },

    // -- Integrity --
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },
}

/// What went wrong underneath a load or store. Diagnostics branch on this,
/// never on the text of `reason`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// The source file does not exist.
    Missing,
    /// Any other filesystem failure (permissions, path is a directory, ...).
    Io,
    /// The format, extension, or colour layout is not supported.
    Unsupported,
    /// The codec rejected the data.
    Codec,
    /// The handle holds no image.
    Empty,
}

impl FailureCause {
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FailureCause::Missing,
            _ => FailureCause::Io,
        }
    }
}

/// Coarse classification of a [`ConvertError`], used by callers and tests
/// that need to branch on the failure without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Init,
    Decode,
    Encode,
    Teardown,
    Lifecycle,
    Integrity,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Init(_) => ErrorKind::Init,
            ConvertError::Teardown(_) => ErrorKind::Teardown,
            ConvertError::HandleInUse => ErrorKind::Lifecycle,
            ConvertError::Decode { .. } => ErrorKind::Decode,
            ConvertError::Encode { .. } => ErrorKind::Encode,
            ConvertError::IntegrityMismatch { .. } => ErrorKind::Integrity,
        }
    }

    /// The underlying cause of a load or store failure.
    pub fn cause(&self) -> Option<FailureCause> {
        match self {
            ConvertError::Decode { cause, .. } | ConvertError::Encode { cause, .. } => Some(*cause),
            _ => None,
        }
    }

    /// Shorthand for a [`ConvertError::Decode`].
    pub fn decode(
        origin: impl Into<String>,
        cause: FailureCause,
        reason: impl std::fmt::Display,
    ) -> Self {
        ConvertError::Decode {
            origin: origin.into(),
            cause,
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a [`ConvertError::Encode`].
    pub fn encode(
        target: impl Into<String>,
        cause: FailureCause,
        reason: impl std::fmt::Display,
    ) -> Self {
        ConvertError::Encode {
            target: target.into(),
            cause,
            reason: reason.to_string(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ConvertError>;
