// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable diagnostics for the process boundary.
//
// Every error is mapped to a plain message, a suggestion, and the exit status
// the binary terminates with.

use crate::error::{ConvertError, ErrorKind, FailureCause};

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Non-zero process exit status.
    pub exit_code: u8,
}

/// Exit status for each error kind. Never zero.
pub fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Init => 2,
        ErrorKind::Decode => 3,
        ErrorKind::Encode => 4,
        ErrorKind::Teardown => 5,
        ErrorKind::Lifecycle => 6,
        ErrorKind::Integrity => 7,
    }
}

/// Convert a `ConvertError` into a `HumanError`.
pub fn humanize_error(err: &ConvertError) -> HumanError {
    let exit_code = exit_code(err.kind());
    match err {
        ConvertError::Init(detail) => HumanError {
            message: "The image library could not be started.".into(),
            suggestion: format!("Check that the build includes the PNM and JPEG codecs. ({detail})"),
            exit_code,
        },

        ConvertError::Decode {
            origin,
            cause,
            reason,
        } => match cause {
            FailureCause::Missing => HumanError {
                message: format!("{origin} does not exist."),
                suggestion: "Check the path, or run from the directory that holds the file.".into(),
                exit_code,
            },
            FailureCause::Io => HumanError {
                message: format!("{origin} could not be opened."),
                suggestion: format!("Check that it is a readable file. ({reason})"),
                exit_code,
            },
            _ => HumanError {
                message: format!("{origin} could not be read as an image."),
                suggestion: format!("The file may be damaged or in an unsupported format. ({reason})"),
                exit_code,
            },
        },

        ConvertError::Encode {
            target,
            cause,
            reason,
        } => match cause {
            FailureCause::Unsupported => HumanError {
                message: format!("{target} cannot be written in that format."),
                suggestion: format!("Use one of .pgm, .ppm, .jpg, .png, .bmp, or .tiff. ({reason})"),
                exit_code,
            },
            FailureCause::Empty => HumanError {
                message: format!("There is no image to write to {target}."),
                suggestion: "Load an image before storing it.".into(),
                exit_code,
            },
            FailureCause::Codec => HumanError {
                message: format!("{target} could not be encoded."),
                suggestion: format!("The image could not be converted to the target format. ({reason})"),
                exit_code,
            },
            FailureCause::Missing | FailureCause::Io => HumanError {
                message: format!("{target} could not be written."),
                suggestion: format!("Check that the directory exists and is writable. ({reason})"),
                exit_code,
            },
        },

        ConvertError::Teardown(detail) => HumanError {
            message: "The image library did not shut down cleanly.".into(),
            suggestion: format!("Output files were already written and can be used. ({detail})"),
            exit_code,
        },

        ConvertError::HandleInUse => HumanError {
            message: "Only one image can be open at a time.".into(),
            suggestion: "Release the current image before opening another.".into(),
            exit_code,
        },

        ConvertError::IntegrityMismatch { .. } => HumanError {
            message: "A written file does not match what was encoded.".into(),
            suggestion: "Another process may be writing to the same path. Run again in a clean directory.".into(),
            exit_code,
        },
    }
}
