//! Pipeline errors and their user-facing classification.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::gateway::GatewayError;
use crate::kerb::MalformedFeature;
use crate::request::RequestValidationError;

/// Coarse failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ErrorKind {
    /// A provider was unreachable, timed out or reported failure.
    UpstreamUnavailable,
    /// A provider response did not match the expected schema.
    UpstreamDecodeError,
    /// A kerb feature lacked its two-point geometry.
    MalformedFeature,
    /// Caller input was out of range or incomplete.
    InvalidRequest,
}

impl ErrorKind {
    /// Stable identifier used in structured error responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpstreamUnavailable => "UpstreamUnavailable",
            Self::UpstreamDecodeError => "UpstreamDecodeError",
            Self::MalformedFeature => "MalformedFeature",
            Self::InvalidRequest => "InvalidRequest",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MalformedFeature {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedFeature
    }
}

impl RequestValidationError {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidRequest
    }
}

/// Errors from [`ParkingPlanner`](crate::ParkingPlanner) operations.
///
/// Any gateway failure aborts the whole request; no partial result is
/// substituted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestValidationError),
    /// Fetching kerb features failed.
    #[error("kerb feature lookup failed: {0}")]
    KerbFeatures(#[source] GatewayError),
    /// Fetching directions failed.
    #[error("directions lookup failed: {0}")]
    Directions(#[source] GatewayError),
}

impl PlanError {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(err) => err.kind(),
            Self::KerbFeatures(err) | Self::Directions(err) => err.kind(),
        }
    }
}
