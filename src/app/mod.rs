//! Application contract and construction protocol.
//!
//! A concrete application is a parameter struct that implements
//! [`Application`]: it declares its parser, binds parsed arguments onto its
//! own fields, and does its work in [`Application::run`]. The
//! [`dispatch`] module drives the whole lifecycle from a command line to an
//! [`ExitStatus`].
//!
//! ```no_run
//! use cmdkit::app::Application;
//! use cmdkit::cli::ClapInterface;
//! use cmdkit::error::AppError;
//! use serde::Deserialize;
//!
//! #[derive(clap::Parser, Deserialize)]
//! struct Echo {
//!     words: Vec<String>,
//! }
//!
//! impl Application for Echo {
//!     type Cli = ClapInterface;
//!
//!     fn interface() -> ClapInterface {
//!         ClapInterface::of::<Echo>()
//!     }
//!
//!     fn run(&mut self) -> Result<(), AppError> {
//!         println!("{}", self.words.join(" "));
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     cmdkit::app::dispatch::exit::<Echo>()
//! }
//! ```

pub mod dispatch;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cli::Interface;
use crate::error::AppError;
use crate::exit_status::ExitStatus;
use crate::namespace::Namespace;

/// A launchable unit of business logic.
///
/// An instance lives for exactly one `run()` call.
pub trait Application: DeserializeOwned {
    /// Parser producing this application's parameters.
    type Cli: Interface;

    /// Whether an empty command line is a legitimate invocation rather than
    /// a usage error.
    const ALLOW_NOARGS: bool = false;

    fn interface() -> Self::Cli;

    /// Business logic. Surface failures through the [`AppError`] taxonomy;
    /// anything that is not help, argument, or interrupt is a `Fault`.
    fn run(&mut self) -> Result<(), AppError>;

    /// Parse `tokens` and bind the result. Help requests and argument
    /// rejections from the parser propagate unchanged.
    fn from_cmdline(tokens: &[String]) -> Result<Self, AppError> {
        let namespace = Self::interface().parse(tokens)?;
        Self::from_namespace(&namespace)
    }

    /// Bind an already-parsed namespace onto a fresh instance.
    ///
    /// Every entry is offered to the parameter struct; undeclared names are
    /// ignored. A declared field with no entry (and no default) is rejected.
    fn from_namespace(namespace: &Namespace) -> Result<Self, AppError> {
        namespace
            .bind()
            .map_err(|err| AppError::ArgumentRejected(format!("invalid parameters: {err}")))
    }

    /// Build directly from name/value pairs, bypassing the parser.
    fn from_parameters<I, K, V>(parameters: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::from_namespace(&parameters.into_iter().collect())
    }

    /// Process entry point; see [`dispatch::main`].
    fn main(tokens: Option<Vec<String>>) -> Result<ExitStatus, AppError> {
        dispatch::main::<Self>(tokens)
    }
}
