//! Application state: the immutable statement corpus plus the settings
//! key-value store the dashboard persists its thresholds in.
//!
//! The corpus is built once here and never mutated; the settings store is a
//! plain string map behind an RwLock with last-write-wins semantics, matching
//! the client-local storage it mirrors.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{instrument, warn};

use crate::config::DashboardConfig;
use crate::corpus::Corpus;
use crate::settings;

pub struct AppState {
    pub config: DashboardConfig,
    pub corpus: Corpus,
    settings: RwLock<HashMap<String, String>>,
}

impl AppState {
    /// Build state from env: load config, generate the corpus, start with an
    /// empty settings store.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = DashboardConfig::from_env();
        Self::with_config(config)
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let corpus = Corpus::build(&config);
        Self {
            config,
            corpus,
            settings: RwLock::new(HashMap::new()),
        }
    }

    /// Read one settings value.
    pub async fn setting(&self, key: &str) -> Option<String> {
        self.settings.read().await.get(key).cloned()
    }

    /// Store one settings value. Unrecognized keys are accepted (the client
    /// may be newer than the backend) but logged.
    #[instrument(level = "debug", skip(self, value), fields(%key, value_len = value.len()))]
    pub async fn put_setting(&self, key: &str, value: String) {
        if !settings::RECOGNIZED_KEYS.contains(&key) {
            warn!(target: "dashboard", %key, "Storing unrecognized settings key");
        }
        self.settings.write().await.insert(key.to_string(), value);
    }

    /// Snapshot of the whole store for one resolution pass.
    pub async fn settings_snapshot(&self) -> HashMap<String, String> {
        self.settings.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn settings_last_write_wins() {
        let state = AppState::with_config(DashboardConfig::default());
        state.put_setting("globalIndividualGoal", "65".into()).await;
        state.put_setting("globalIndividualGoal", "70".into()).await;
        assert_eq!(state.setting("globalIndividualGoal").await.as_deref(), Some("70"));
        assert_eq!(state.setting("missing").await, None);
    }

    #[tokio::test]
    async fn snapshot_reflects_the_store() {
        let state = AppState::with_config(DashboardConfig::default());
        state.put_setting("globalAttendanceThreshold", "82".into()).await;
        let snap = state.settings_snapshot().await;
        assert_eq!(snap.get("globalAttendanceThreshold").map(String::as_str), Some("82"));
    }
}
