//! Engine configuration loading.
//!
//! The network and route settings are read once at startup and never
//! change afterwards. Without a file the built-in reference network is used.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{DistanceMatrix, NetworkError};
use crate::planner::RouteConfig;

/// Errors from loading an engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The contents are not a valid configuration
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The distance matrix is malformed
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),

    /// The operating window closes before it opens
    #[error("operating hours close ({closes}) before they open ({opens})")]
    InvalidWindow { opens: String, closes: String },
}

/// Everything needed to build a route engine.
///
/// The JSON form keeps route settings at the top level next to the matrix:
///
/// ```
/// use metro_planner::config::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{
///     "speed_kmh": 40,
///     "opens": "7:00 AM",
///     "distances": [[0, 12], [12, 0]]
/// }"#).unwrap();
///
/// assert_eq!(config.network.len(), 2);
/// assert_eq!(config.route.speed_kmh.get(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Station-to-station distances.
    pub network: DistanceMatrix,

    /// Speed and operating hours.
    pub route: RouteConfig,
}

/// On-disk shape, before the matrix is validated.
#[derive(Deserialize)]
struct RawEngineConfig {
    distances: Vec<Vec<Option<u32>>>,
    #[serde(flatten)]
    route: RouteConfig,
}

impl EngineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawEngineConfig = serde_json::from_str(s)?;
        let config = Self {
            network: DistanceMatrix::try_from(raw.distances)?,
            route: raw.route,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.route.closes < self.route.opens {
            return Err(ConfigError::InvalidWindow {
                opens: self.route.opens.to_string(),
                closes: self.route.closes.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    /// The reference network with default route settings.
    fn default() -> Self {
        Self {
            network: DistanceMatrix::reference(),
            route: RouteConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::domain::Station;
    use crate::planner::RouteEngine;

    #[test]
    fn default_is_reference() {
        let config = EngineConfig::default();
        assert_eq!(config.network, DistanceMatrix::reference());
        assert_eq!(config.route, RouteConfig::default());
    }

    #[test]
    fn parse_distances_only() {
        let config = EngineConfig::from_json_str(r#"{"distances": [[0, 3], [3, 0]]}"#).unwrap();
        assert_eq!(config.network.len(), 2);
        assert_eq!(config.route, RouteConfig::default());
    }

    #[test]
    fn parse_full() {
        let config = EngineConfig::from_json_str(
            r#"{
                "speed_kmh": 60,
                "opens": "5:30 AM",
                "closes": "11:30 PM",
                "distances": [[0, null, 4], [null, 0, 2], [4, 2, 0]]
            }"#,
        )
        .unwrap();

        assert_eq!(config.route.speed_kmh.get(), 60);
        assert_eq!(config.route.opens.to_string(), "05:30 AM");
        assert_eq!(config.route.closes.to_string(), "11:30 PM");

        let a = Station::parse("A").unwrap();
        let b = Station::parse("B").unwrap();
        assert_eq!(config.network.distance(a, b), None);
    }

    #[test]
    fn missing_distances_rejected() {
        let err = EngineConfig::from_json_str(r#"{"speed_kmh": 30}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn malformed_matrix_rejected() {
        let err = EngineConfig::from_json_str(r#"{"distances": [[1]]}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Network(NetworkError::NonZeroDiagonal('A'))
        ));
        assert_eq!(
            err.to_string(),
            "invalid network: distance from station A to itself must be 0"
        );

        let err = EngineConfig::from_json_str(r#"{"distances": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Network(NetworkError::Empty)));
    }

    #[test]
    fn bad_time_rejected() {
        let err =
            EngineConfig::from_json_str(r#"{"opens": "6am", "distances": [[0]]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn inverted_window_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{"opens": "8:00 PM", "closes": "6:00 AM", "distances": [[0]]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "operating hours close (06:00 AM) before they open (08:00 PM)"
        );
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"speed_kmh": 20, "distances": [[0, 5], [5, 0]]}}"#).unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        let engine = RouteEngine::from(config);

        let it = engine.plan_from_input("A", "B", "10:00 AM").unwrap();
        assert_eq!(it.total_minutes(), 15);
    }

    #[test]
    fn missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = EngineConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read"));
    }
}
