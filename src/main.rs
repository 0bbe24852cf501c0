//! CLI entry point for cmdkit-greet, a small application launched through
//! the cmdkit dispatcher.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cmdkit::app::{dispatch, Application};
use cmdkit::cli::ClapInterface;
use cmdkit::config::{user_config_path, Configuration, LocalSources};
use cmdkit::error::{AppError, ConfigError};
use cmdkit::interrupt;
use cmdkit::namespace::Namespace;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

const APP_NAME: &str = "greet";
const ENV_PREFIX: &str = "GREET";
const DEFAULT_GREETING: &str = "Hello";

/// Print a configurable greeting.
///
/// The greeting comes from layered configuration: built-in default,
/// ~/.config/cmdkit/greet.toml, ./greet.toml, --config, then GREET_* variables.
#[derive(Debug, Parser, Deserialize)]
#[command(name = "cmdkit-greet", version)]
struct Greet {
    /// Who to greet.
    name: String,

    /// How many times to print the greeting.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Print in upper case.
    #[arg(long)]
    shout: bool,

    /// Extra config file (TOML or JSON), applied after the default locations.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

impl Greet {
    fn sources(&self) -> LocalSources {
        let mut default = Namespace::new();
        default.insert("greeting", DEFAULT_GREETING);

        let mut sources = LocalSources::new(default);
        if let Some(path) = user_config_path(APP_NAME) {
            sources = sources.file("user", path);
        }
        sources = sources.file("local", format!("{APP_NAME}.toml"));
        if let Some(path) = &self.config {
            sources = sources.file("explicit", path.clone());
        }
        sources.env(ENV_PREFIX)
    }

    fn line(&self, greeting: &str) -> String {
        let line = format!("{greeting}, {}!", self.name);
        if self.shout {
            line.to_uppercase()
        } else {
            line
        }
    }
}

fn greeting_from(config: &Configuration) -> Result<String, ConfigError> {
    match config.expand("greeting") {
        Ok(Value::String(text)) => Ok(text),
        Ok(Value::Null) | Err(ConfigError::Missing(_)) => Ok(DEFAULT_GREETING.to_string()),
        Ok(other) => Ok(other.to_string()),
        Err(err) => Err(err),
    }
}

impl Application for Greet {
    type Cli = ClapInterface;

    fn interface() -> ClapInterface {
        ClapInterface::of::<Greet>()
    }

    fn run(&mut self) -> Result<(), AppError> {
        let config = Configuration::from_local(&self.sources())?;
        let greeting = greeting_from(&config)?;
        if let Ok(layer) = config.which(&["greeting"]) {
            debug!(layer, "greeting resolved");
        }
        info!(name = %self.name, count = self.count, "greeting");

        for _ in 0..self.count {
            interrupt::check()?;
            println!("{}", self.line(&greeting));
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    dispatch::exit::<Greet>()
}
