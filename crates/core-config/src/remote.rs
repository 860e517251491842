use indexmap::IndexMap;
use snafu::ResultExt;

use crate::error::{self as config_error, ConfigError, ConfigResult};

/// Key-value configuration fetched from a remote endpoint once at
/// startup, consumed to build hyperlink URLs embedded in HTML reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    entries: IndexMap<String, String>,
}

impl RemoteConfig {
    /// Fetch and parse the endpoint. The body is tab-delimited
    /// `key<TAB>value` lines; blank lines and `#` comments are skipped
    /// and the last occurrence of a key wins.
    #[tracing::instrument(name = "RemoteConfig::fetch", level = "debug", err)]
    pub async fn fetch(url: &str) -> ConfigResult<Self> {
        let response = reqwest::get(url).await.context(config_error::FetchSnafu)?;
        let status = response.status();
        if !status.is_success() {
            return config_error::StatusSnafu {
                url,
                status: status.as_u16(),
            }
            .fail();
        }
        let body = response.text().await.context(config_error::FetchSnafu)?;
        let config = Self::parse(&body);
        tracing::debug!(entries = config.len(), "fetched remote configuration");
        Ok(config)
    }

    #[must_use]
    pub fn parse(body: &str) -> Self {
        let mut entries = IndexMap::new();
        for line in body.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('\t') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> ConfigResult<&str> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
