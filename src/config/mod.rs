//! Layered application configuration.
//!
//! A [`Configuration`] keeps every source namespace under a label (defaults,
//! system file, user file, environment, ...) and a merged view in which later
//! layers override earlier ones depth-first. [`Configuration::which`] reports
//! the layer a value came from.

mod environ;
mod sources;

pub use environ::{coerce, Environ};
pub use sources::{config_root_dir, user_config_path, LocalSources};

use serde_json::Value;

use crate::error::ConfigError;
use crate::namespace::Namespace;

/// Ordered collection of labelled namespaces plus their merged view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    layers: Vec<(String, Namespace)>,
    merged: Namespace,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(label, namespace)` pairs, lowest priority first.
    pub fn from_layers<I, S>(layers: I) -> Self
    where
        I: IntoIterator<Item = (S, Namespace)>,
        S: Into<String>,
    {
        let mut cfg = Self::new();
        for (label, namespace) in layers {
            cfg.extend(label, namespace);
        }
        cfg
    }

    /// Add a layer on top of the merged view.
    ///
    /// Reusing a label replaces that layer's contents in place and rebuilds
    /// the merged view, so [`get`](Self::get) and [`which`](Self::which)
    /// stay in agreement.
    pub fn extend(&mut self, label: impl Into<String>, namespace: Namespace) {
        let label = label.into();
        match self.layers.iter_mut().find(|(name, _)| *name == label) {
            Some((_, existing)) => {
                *existing = namespace;
                self.rebuild();
            }
            None => {
                self.merged.update(namespace.clone());
                self.layers.push((label, namespace));
            }
        }
    }

    fn rebuild(&mut self) {
        let mut merged = Namespace::new();
        for (_, layer) in &self.layers {
            merged.update(layer.clone());
        }
        self.merged = merged;
    }

    /// Load defaults, files and (optionally) environment in priority order.
    pub fn from_local(sources: &LocalSources) -> Result<Self, ConfigError> {
        sources.load_with(std::env::vars())
    }

    pub fn merged(&self) -> &Namespace {
        &self.merged
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.merged.get(key)
    }

    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        self.merged.get_path(path)
    }

    /// Merged value with `_env`/`_eval` indirection resolved.
    pub fn expand(&self, key: &str) -> Result<Value, ConfigError> {
        self.merged.expand(key)
    }

    pub fn namespace(&self, label: &str) -> Option<&Namespace> {
        self.layers
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, ns)| ns)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(name, _)| name.as_str())
    }

    /// Label of the highest-priority layer that defines `path`.
    pub fn which(&self, path: &[&str]) -> Result<&str, ConfigError> {
        self.layers
            .iter()
            .rev()
            .find(|(_, ns)| ns.get_path(path).is_some())
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| ConfigError::Missing(path.join(".")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
