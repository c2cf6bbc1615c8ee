//! Error types emitted by the Kerbside CLI.

use std::sync::Arc;

use kerbside_core::{ErrorKind, PlanError};
use kerbside_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Kerbside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Constructing the kerb-regulation gateway failed.
    #[error("failed to build kerb provider for {base_url:?}: {source}")]
    BuildKerbSource {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Constructing the directions gateway failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildDirectionsProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the request or an upstream call failed.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// Encoding the command output as JSON failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Stable identifier reported in the error envelope.
    ///
    /// Planner failures use their [`ErrorKind`]; input problems are
    /// reported as `InvalidRequest`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ArgumentParsing(_) | Self::Configuration(_) | Self::MissingArgument { .. } => {
                ErrorKind::InvalidRequest.as_str()
            }
            Self::BuildKerbSource { .. } | Self::BuildDirectionsProvider { .. } => {
                "ProviderBuildError"
            }
            Self::Plan(err) => err.kind().as_str(),
            Self::SerialiseOutput(_) | Self::WriteOutput(_) => "OutputError",
        }
    }
}
