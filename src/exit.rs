// src/exit.rs
//! Process exit codes for `fdlgraph`.
//!
//! Stable contract for scripts driving the pipeline.

use crate::error::FdlError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FdlExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (IO on input, unexpected failure).
    Error = 1,
    /// Input validation failed (malformed graph, bad config, wrong algorithm).
    InvalidInput = 2,
    /// The run finished but at least one output file could not be written.
    ExportFailure = 3,
}

impl FdlExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps an error chain to the most specific exit code it carries.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<FdlError>() {
            Some(FdlError::Export(_)) => Self::ExportFailure,
            Some(e) if e.is_invalid_input() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for FdlExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
