//! Recording session managing per-port cassette recorders.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use super::recorder::CassetteRecorder;
use crate::error::{Error, Result};

/// Per-port recorders for one CLI invocation.
///
/// Each port writes its own cassette file inside a timestamped
/// directory under the configured root.
pub struct RecordingSession {
    /// Recorder for link interactions.
    pub links: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for account interactions.
    pub account: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for RSS interactions.
    pub rss: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing to `<root>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: impl Into<PathBuf>, server: &str) -> Result<Self> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.into().join(&timestamp);

        if output_dir.exists() {
            return Err(Error::Cassette(format!(
                "cassette directory already exists: {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(&output_dir)?;

        let make_recorder = |port: &str| {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"), server)))
        };

        Ok(Self {
            links: make_recorder("links"),
            account: make_recorder("account"),
            rss: make_recorder("rss"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Write every port's cassette file.
    ///
    /// The recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<()> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| {
                    Error::Cassette(format!("recording adapter for {port} still has references"))
                })?
                .into_inner()
                .map_err(|e| Error::Cassette(format!("recorder lock for {port} poisoned: {e}")))?;
            let path = recorder.finish()?;
            info!(port, path = %path.display(), "cassette written");
            Ok(())
        }

        finish_one(self.links, "links")?;
        finish_one(self.account, "account")?;
        finish_one(self.rss, "rss")?;
        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    #[test]
    fn writes_one_cassette_per_port() {
        let root = std::env::temp_dir().join("linkward_session_test");
        let session = RecordingSession::new(&root, "http://localhost:3000").unwrap();
        session.links.lock().unwrap().record(
            "links",
            "fetch_link",
            json!({"id": 1}),
            json!({"Ok": null}),
        );

        let dir = session.finish().unwrap();
        let links = Cassette::load(&dir.join("links.cassette.yaml")).unwrap();
        assert_eq!(links.interactions.len(), 1);
        assert_eq!(links.server, "http://localhost:3000");
        assert!(dir.join("rss.cassette.yaml").exists());
        assert!(dir.join("account.cassette.yaml").exists());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn finish_fails_while_adapter_holds_recorder() {
        let root = std::env::temp_dir().join("linkward_session_busy_test");
        let session = RecordingSession::new(&root, "http://localhost:3000").unwrap();
        let _held = Arc::clone(&session.rss);

        let err = session.finish().unwrap_err();
        assert!(err.to_string().contains("rss still has references"));

        let _ = std::fs::remove_dir_all(&root);
    }
}
