//! Per-port cassette selection for replay.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::Result;

/// Per-port cassette file paths. Ports without a path are served by a
/// panicking adapter during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the links port.
    pub links: Option<PathBuf>,
    /// Cassette for the account port.
    pub account: Option<PathBuf>,
    /// Cassette for the RSS port.
    pub rss: Option<PathBuf>,
}

/// Shared replayer handle, as held by the replaying adapters.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Replayers for the configured ports.
pub struct PortReplayers {
    /// Replayer for the links port.
    pub links: Option<SharedReplayer>,
    /// Replayer for the account port.
    pub account: Option<SharedReplayer>,
    /// Replayer for the RSS port.
    pub rss: Option<SharedReplayer>,
}

impl CassetteConfig {
    /// Uses one cassette file for every port.
    #[must_use]
    pub fn monolithic(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self { links: Some(path.clone()), account: Some(path.clone()), rss: Some(path) }
    }

    /// Load every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers> {
        let load = |path: &Option<PathBuf>| -> Result<Option<SharedReplayer>> {
            path.as_deref()
                .map(|p| {
                    let cassette = Cassette::load(p)?;
                    Ok(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
                })
                .transpose()
        };

        Ok(PortReplayers {
            links: load(&self.links)?,
            account: load(&self.account)?,
            rss: load(&self.rss)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &std::path::Path, port: &str, method: &str) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            server: "http://localhost:3000".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: port.into(),
                method: method.into(),
                input: json!({}),
                output: json!({"Ok": null}),
            }],
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn loads_only_configured_ports() {
        let dir = std::env::temp_dir().join("linkward_cassette_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let rss_path = dir.join("rss.cassette.yaml");
        write_cassette(&rss_path, "rss", "delete_subscription");

        let config = CassetteConfig { rss: Some(rss_path), ..CassetteConfig::default() };
        let replayers = config.load_all().unwrap();

        assert!(replayers.links.is_none());
        assert!(replayers.account.is_none());
        let rss = replayers.rss.unwrap();
        assert_eq!(rss.lock().unwrap().remaining("rss", "delete_subscription"), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_an_error() {
        let config = CassetteConfig::monolithic("/nonexistent/all.cassette.yaml");
        assert!(config.load_all().is_err());
    }
}
