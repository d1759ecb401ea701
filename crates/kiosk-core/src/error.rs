// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Domain error kinds produced by the display service core.
///
/// Transport layers (gRPC, HTTP) map these onto their own status
/// representations; the core never depends on a transport crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An id was supplied that refers to no live entity.
    NotFound(String),
    /// Malformed input (missing required field, etc).
    InvalidArgument(String),
    /// Unrecovered implementation fault.
    Internal(String),
}

impl CoreError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m) | Self::InvalidArgument(m) | Self::Internal(m) => m,
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.as_str(), self.message())
    }
}

impl std::error::Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
