//! Command-line parser contract and its clap-backed implementation.
//!
//! An [`Interface`] turns raw tokens (program name excluded) into a
//! [`Namespace`] or a typed [`CliError`]. [`ClapInterface`] adapts any
//! `clap::Command`, including `#[derive(Parser)]` types.

mod matches;

use clap::error::ErrorKind;
use clap::{Command, CommandFactory};

use crate::error::CliError;
use crate::namespace::Namespace;

/// Parser contract consumed by the dispatcher.
pub trait Interface {
    /// Precomputed usage text, printed when invoked without arguments.
    fn usage_text(&self) -> &str;

    /// Parse tokens into named parameters.
    fn parse(&self, tokens: &[String]) -> Result<Namespace, CliError>;
}

/// [`Interface`] over a `clap::Command`.
#[derive(Debug, Clone)]
pub struct ClapInterface {
    command: Command,
    usage_text: String,
    help_text: Option<String>,
}

impl ClapInterface {
    pub fn new(mut command: Command) -> Self {
        command.build();
        let usage_text = command.render_usage().to_string();
        Self {
            command,
            usage_text,
            help_text: None,
        }
    }

    /// Interface for a `#[derive(Parser)]` type.
    pub fn of<P: CommandFactory>() -> Self {
        Self::new(P::command())
    }

    /// Replace the usage text shown on empty invocations.
    pub fn with_usage_text(mut self, text: impl Into<String>) -> Self {
        self.usage_text = text.into();
        self
    }

    /// Replace clap's rendered help with fixed text.
    pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Full help, as `--help` would print it.
    pub fn help_text(&self) -> String {
        match &self.help_text {
            Some(text) => text.clone(),
            None => self.command.clone().render_help().to_string(),
        }
    }

    fn classify(&self, err: clap::Error) -> CliError {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                CliError::HelpRequested(
                    self.help_text
                        .clone()
                        .unwrap_or_else(|| err.render().to_string()),
                )
            }
            ErrorKind::DisplayVersion => CliError::HelpRequested(err.render().to_string()),
            _ => CliError::ArgumentRejected(summarize(&err)),
        }
    }
}

impl Interface for ClapInterface {
    fn usage_text(&self) -> &str {
        &self.usage_text
    }

    fn parse(&self, tokens: &[String]) -> Result<Namespace, CliError> {
        let argv = std::iter::once(self.command.get_name().to_string()).chain(tokens.iter().cloned());
        let parsed = self
            .command
            .clone()
            .try_get_matches_from(argv)
            .map_err(|err| self.classify(err))?;
        Ok(matches::to_namespace(&self.command, &parsed))
    }
}

/// First line of a clap error without the `error: ` lead-in.
fn summarize(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
