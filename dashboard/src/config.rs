//! Dashboard settings loaded via OrthoConfig.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use user_directory::{UserDirectory, generate_directory};

use crate::error::DashboardError;
use crate::session::SessionConfig;

const DEFAULT_QUERY_LATENCY_MS: u64 = 500;
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_USER_COUNT: usize = 12;

/// Configuration values for the dashboard binary.
///
/// Every value can be set with a `--flag`, a `DASHBOARD_*` environment
/// variable, or a configuration file key.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Simulated query latency in milliseconds.
    pub query_latency_ms: Option<u64>,
    /// Search box quiet period in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Directory document to load instead of the bundled directory.
    pub directory_path: Option<PathBuf>,
    /// Generate a demo directory from this seed instead.
    pub seed: Option<u64>,
    /// Size of a generated directory.
    pub user_count: Option<usize>,
}

/// Where the session's records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    /// The built-in seven-record directory.
    Bundled,
    /// A directory document on disk.
    File(PathBuf),
    /// A deterministic demo directory.
    Generated {
        /// Generator seed.
        seed: u64,
        /// Number of records.
        count: usize,
    },
}

impl DirectorySource {
    /// Loads the directory this source names.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Directory`] when a file cannot be read or
    /// fails validation, and [`DashboardError::Generation`] when a demo
    /// directory cannot be built.
    pub fn load(&self) -> Result<Arc<UserDirectory>, DashboardError> {
        let directory = match self {
            Self::Bundled => UserDirectory::bundled()?,
            Self::File(path) => UserDirectory::from_file(path)?,
            Self::Generated { seed, count } => generate_directory(*seed, *count)?,
        };
        Ok(Arc::new(directory))
    }
}

impl DashboardSettings {
    /// Return the configured query latency, falling back to the default.
    #[must_use]
    pub fn query_latency(&self) -> Duration {
        Duration::from_millis(self.query_latency_ms.unwrap_or(DEFAULT_QUERY_LATENCY_MS))
    }

    /// Return the configured debounce period, falling back to the default.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    /// Return the configured generated directory size.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.user_count.unwrap_or(DEFAULT_USER_COUNT)
    }

    /// Timing parameters for a session.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            latency: self.query_latency(),
            debounce: self.debounce(),
        }
    }

    /// Resolve the record source; a seed takes precedence over a path.
    #[must_use]
    pub fn directory_source(&self) -> DirectorySource {
        if let Some(seed) = self.seed {
            DirectorySource::Generated {
                seed,
                count: self.user_count(),
            }
        } else if let Some(path) = &self.directory_path {
            DirectorySource::File(path.clone())
        } else {
            DirectorySource::Bundled
        }
    }
}
