//! Environment-variable configuration source.
//!
//! `MYAPP_A_X=1` and `MYAPP_B=3` with prefix `MYAPP` reduce to
//! `{a: {x: 1}, b: 3}`.

use serde_json::{Map, Number, Value};

use crate::namespace::Namespace;

/// Environment variables selected by name prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environ {
    prefix: String,
    vars: Namespace,
}

impl Environ {
    /// Capture the process environment.
    pub fn from_env(prefix: &str, defaults: Option<Namespace>) -> Self {
        Self::from_vars(prefix, std::env::vars(), defaults)
    }

    /// Capture an explicit set of variables; entries override `defaults`.
    pub fn from_vars<I>(prefix: &str, vars: I, defaults: Option<Namespace>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut selected = defaults.unwrap_or_default();
        for (name, value) in vars {
            if name.starts_with(prefix) {
                selected.insert(name, value);
            }
        }
        Self {
            prefix: prefix.to_string(),
            vars: selected,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Raw, un-reduced variables.
    pub fn vars(&self) -> &Namespace {
        &self.vars
    }

    /// Nest variables by splitting on `_` using the default coercion.
    pub fn reduce(&self) -> Namespace {
        self.reduce_with(coerce)
    }

    pub fn reduce_with<F>(&self, converter: F) -> Namespace
    where
        F: Fn(&str) -> Value,
    {
        let mut reduced = Namespace::new();
        for (name, value) in self.vars.iter() {
            let Some(rest) = self.strip_prefix(name) else {
                continue;
            };
            let sections: Vec<String> = rest.split('_').map(str::to_lowercase).collect();
            let Some((leaf, parents)) = sections.split_last() else {
                continue;
            };

            let raw = match value {
                Value::String(s) => converter(s),
                other => other.clone(),
            };
            let mut nested = Map::new();
            nested.insert(leaf.clone(), raw);
            for parent in parents.iter().rev() {
                let mut outer = Map::new();
                outer.insert(parent.clone(), Value::Object(nested));
                nested = outer;
            }
            reduced.update(Namespace::from(nested));
        }
        reduced
    }

    fn strip_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return (!name.is_empty()).then_some(name);
        }
        let rest = name.strip_prefix(self.prefix.as_str())?;
        let rest = rest.strip_prefix('_').unwrap_or(rest);
        (!rest.is_empty()).then_some(rest)
    }
}

/// Default coercion for environment values.
///
/// `""`/`null` become null, `true`/`false` booleans, then integer, then finite
/// float; anything else stays a string.
pub fn coerce(raw: &str) -> Value {
    let lowered = raw.to_lowercase();
    match lowered.as_str() {
        "" | "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.trim().parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.trim().parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}
