//! cmdkit — a uniform launch contract for command-line applications.
//!
//! An application declares its parameters as a struct, names the parser that
//! produces them, and implements one behavior, [`Application::run`]. The
//! dispatcher turns a command line into an instance, runs it, and maps every
//! outcome onto a stable [`ExitStatus`].
//!
//! - [`exit_status`] - termination code catalog
//! - [`cli`] - parser contract and the clap-backed [`ClapInterface`]
//! - [`app`] - application contract and the [`dispatch`](app::dispatch) lifecycle
//! - [`config`] - layered configuration from files and environment
//! - [`logging`] - `tracing` subscriber setup and the critical sink
//! - [`interrupt`] - cooperative Ctrl-C handling
//!
//! [`Application::run`]: app::Application::run
//! [`ExitStatus`]: exit_status::ExitStatus
//! [`ClapInterface`]: cli::ClapInterface

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit_status;
pub mod interrupt;
pub mod logging;
pub mod namespace;
#[cfg(test)]
pub mod testsupport;

pub use app::Application;
pub use error::{AppError, CliError, ConfigError};
pub use exit_status::ExitStatus;
pub use namespace::Namespace;
