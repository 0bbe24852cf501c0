//! Config-file source discovery and cascade loading.
//!
//! Source order implements the precedence contract:
//! environment > files (later beats earlier) > built-in defaults.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ConfigError;
use crate::namespace::Namespace;

use super::{Configuration, Environ};

/// Label given to the reduced environment layer.
pub const ENV_LAYER: &str = "env";
/// Label given to the built-in defaults layer.
pub const DEFAULT_LAYER: &str = "default";

/// Where [`Configuration::from_local`] reads from.
#[derive(Debug, Clone, Default)]
pub struct LocalSources {
    pub default: Namespace,
    /// `(label, path)` pairs, lowest priority first. Missing files are skipped.
    pub files: Vec<(String, PathBuf)>,
    /// When set, variables with this prefix form the top layer.
    pub env_prefix: Option<String>,
}

impl LocalSources {
    pub fn new(default: Namespace) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    pub fn file(mut self, label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.push((label.into(), path.into()));
        self
    }

    pub fn env(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub(super) fn load_with<I>(&self, vars: I) -> Result<Configuration, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut cfg = Configuration::new();
        cfg.extend(DEFAULT_LAYER, self.default.clone());
        for (label, path) in &self.files {
            if !path.exists() {
                debug!(label = %label, path = %path.display(), "config file not found, skipping");
            }
            cfg.extend(label.as_str(), Namespace::from_local(path, true)?);
        }
        if let Some(prefix) = &self.env_prefix {
            cfg.extend(ENV_LAYER, Environ::from_vars(prefix, vars, None).reduce());
        }
        Ok(cfg)
    }
}

/// Per-user config root (`$XDG_CONFIG_HOME`, else `~/.config`).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

/// Default per-user config file for an application, e.g.
/// `~/.config/cmdkit/greet.toml`.
pub fn user_config_path(app_name: &str) -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("cmdkit").join(format!("{app_name}.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn cascade_applies_files_then_environment() {
        let dir = TestTempDir::new("sources");
        let system = dir.write_text("system.toml", "greeting = \"hello\"\n[net]\nport = 80\n");
        let user = dir.write_text("user.json", r#"{"net": {"host": "example.org"}}"#);
        let default: Namespace = [("greeting", "hi")].into_iter().collect();

        let sources = LocalSources::new(default)
            .file("system", system)
            .file("user", user)
            .file("local", dir.child("missing.toml"))
            .env("MYAPP");
        let cfg = sources
            .load_with(vars(&[("MYAPP_NET_PORT", "8080"), ("UNRELATED", "x")]))
            .unwrap();

        assert_eq!(
            cfg.labels().collect::<Vec<_>>(),
            ["default", "system", "user", "local", "env"]
        );
        assert_eq!(cfg.get("greeting"), Some(&json!("hello")));
        assert_eq!(cfg.get_path(&["net", "host"]), Some(&json!("example.org")));
        assert_eq!(cfg.get_path(&["net", "port"]), Some(&json!(8080)));
        assert_eq!(cfg.which(&["net", "port"]).unwrap(), "env");
        assert_eq!(cfg.which(&["greeting"]).unwrap(), "system");
        assert!(cfg.namespace("local").unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TestTempDir::new("sources-bad");
        let bad = dir.write_text("bad.toml", "x = [unclosed");
        let result = LocalSources::default().file("bad", bad).load_with(Vec::new());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn no_env_layer_without_prefix() {
        let cfg = LocalSources::default()
            .load_with(vars(&[("MYAPP_X", "1")]))
            .unwrap();
        assert_eq!(cfg.labels().collect::<Vec<_>>(), ["default"]);
    }

    #[test]
    fn user_config_path_is_namespaced() {
        if let Some(path) = user_config_path("greet") {
            assert!(path.ends_with("cmdkit/greet.toml"));
        }
    }
}
