// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_NAMESPACE: &str = "sample_mflix";

pub const MONGO_URI_VAR: &str = "MFLIX_DB_URI";
pub const NAMESPACE_VAR: &str = "MFLIX_NS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mongo_uri: String,
    /// Database holding the `comments` collection.
    pub namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(uri) = env::var(MONGO_URI_VAR) {
            cfg.mongo_uri = uri;
        }
        match env::var(NAMESPACE_VAR) {
            Ok(ns) => cfg.namespace = ns,
            Err(_) => tracing::debug!("{} not set, using '{}'", NAMESPACE_VAR, cfg.namespace),
        }
        cfg
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn with_overrides(mut self, mongo_uri: Option<String>, namespace: Option<String>) -> Self {
        if let Some(uri) = mongo_uri {
            self.mongo_uri = uri;
        }
        if let Some(ns) = namespace {
            self.namespace = ns;
        }
        self
    }
}
