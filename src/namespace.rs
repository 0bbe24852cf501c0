//! Ordered name → value mapping shared by argument parsing and configuration.
//!
//! A parsed command line is a flat namespace (`{"count": 3, "name": "x"}`);
//! configuration files produce nested ones. Both merge with [`Namespace::update`],
//! which descends into tables instead of replacing them.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Insertion-ordered mapping from parameter name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Map<String, Value>);

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Walk nested tables, e.g. `["database", "port"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for segment in rest {
            current = current.as_object()?.get(*segment)?;
        }
        Some(current)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Depth-first override: tables present on both sides are merged
    /// recursively, every other value from `other` replaces ours.
    pub fn update(&mut self, other: Namespace) {
        depth_first_update(&mut self.0, other.0);
    }

    /// Bind every entry onto a statically declared parameter struct.
    ///
    /// Keys the struct does not declare are ignored; declared fields without
    /// a matching key fail unless the field is optional or defaulted.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }

    // -----------------------------------------------------------------------
    // Indirect lookup (`key_env`, `key_eval`)
    // -----------------------------------------------------------------------

    /// Look up `key` directly, or through `key_env` (environment variable)
    /// or `key_eval` (shell expression).
    pub fn expand(&self, key: &str) -> Result<Value, ConfigError> {
        self.expand_with(key, |name| std::env::var(name).ok(), shell_eval)
    }

    pub fn expand_with<FEnv, FEval>(
        &self,
        key: &str,
        env_lookup: FEnv,
        eval: FEval,
    ) -> Result<Value, ConfigError>
    where
        FEnv: Fn(&str) -> Option<String>,
        FEval: Fn(&str) -> Result<String, ConfigError>,
    {
        if let Some(value) = self.0.get(key) {
            return Ok(value.clone());
        }
        let env_key = format!("{key}_env");
        let eval_key = format!("{key}_eval");
        match (self.0.get(&env_key), self.0.get(&eval_key)) {
            (None, None) => Err(ConfigError::Missing(key.to_string())),
            (Some(var), None) => {
                let var = value_as_text(var);
                Ok(env_lookup(&var).map(Value::String).unwrap_or(Value::Null))
            }
            (None, Some(expr)) => {
                let expr = value_as_text(expr);
                Ok(Value::String(eval(&expr)?.trim().to_string()))
            }
            (Some(_), Some(_)) => Err(ConfigError::Ambiguous(key.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    /// Load from a file, choosing the format by extension.
    pub fn from_local(path: &Path, ignore_if_missing: bool) -> Result<Self, ConfigError> {
        if ignore_if_missing && !path.exists() {
            return Ok(Self::new());
        }
        let format = Format::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        match format {
            Format::Toml => Self::from_toml_str(&text),
            Format::Json => Self::from_json_str(&text),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write to a file, choosing the format by extension.
    pub fn to_local(&self, path: &Path) -> Result<(), ConfigError> {
        let text = match Format::from_path(path)? {
            Format::Toml => self.to_toml_string()?,
            Format::Json => self.to_json_string()?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    /// TOML has no null; null entries fail to serialize.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl From<Map<String, Value>> for Namespace {
    fn from(map: Map<String, Value>) -> Self {
        Namespace(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Namespace(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Namespace {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match ext {
            "toml" | "tml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Unsupported(other.to_string())),
        }
    }
}

fn depth_first_update(original: &mut Map<String, Value>, new: Map<String, Value>) {
    for (key, value) in new {
        match (original.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                depth_first_update(existing, incoming);
            }
            (_, value) => {
                original.insert(key, value);
            }
        }
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Run `expr` through `sh -c` and return its stdout.
pub fn shell_eval(expr: &str) -> Result<String, ConfigError> {
    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(expr)
        .output()?;
    if !output.status.success() {
        return Err(ConfigError::Eval(format!(
            "`{expr}` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
