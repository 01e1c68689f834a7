//! Optional run configuration read from `unity_docxml.ron`.
//!
//! Every field has a default, so a partial file only overrides what it names
//! and a missing file means a default run. A broken file is reported by the
//! caller, which then also runs with defaults.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docxml_engine::{
    BatchSettings, FetchSettings, ScrapeSettings, DEFAULT_ASSEMBLY, DEFAULT_INDEX_URL,
    DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_NAMESPACE, DEFAULT_PAGE_TIMEOUT,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "unity_docxml.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub index_url: String,
    pub namespace_prefix: String,
    pub assembly_name: String,
    pub output_path: PathBuf,
    pub max_concurrent_fetches: usize,
    pub page_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            namespace_prefix: DEFAULT_NAMESPACE.to_string(),
            assembly_name: DEFAULT_ASSEMBLY.to_string(),
            output_path: PathBuf::from(format!("{DEFAULT_ASSEMBLY}.xml")),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            page_timeout_secs: DEFAULT_PAGE_TIMEOUT.as_secs(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_to_file: false,
        }
    }
}

impl AppConfig {
    pub fn scrape_settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            index_url: self.index_url.clone(),
            namespace: self.namespace_prefix.clone(),
            assembly_name: self.assembly_name.clone(),
            batch: BatchSettings {
                max_concurrent_fetches: self.max_concurrent_fetches.max(1),
                page_timeout: Duration::from_secs(self.page_timeout_secs.max(1)),
            },
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Load the config from `path`. A missing file is not an error and yields
/// the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
