//! Top-level lifecycle: tokens → instance → `run()` → exit status.
//!
//! Outcomes are classified in a fixed priority order:
//!
//! | outcome            | action                         | status               |
//! |--------------------|--------------------------------|----------------------|
//! | no tokens          | print usage (unless allowed)   | `usage`              |
//! | completed          |                                | `success`            |
//! | help requested     | print carried text             | `usage`              |
//! | argument rejected  | critical log of the message    | `bad_argument`       |
//! | interrupted        | critical log, fixed message    | `keyboard_interrupt` |
//! | anything else      | critical log, then propagate   | none                 |

use std::ffi::OsString;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use tracing::debug;

use crate::cli::Interface;
use crate::error::{AppError, CliError};
use crate::exit_status::ExitStatus;
use crate::{interrupt, logging};

use super::Application;

/// Logged when an interrupt ends the run.
pub const INTERRUPT_MESSAGE: &str = "keyboard-interrupt: going down now!";
/// Logged before an unclassified fault is propagated.
pub const FAULT_MESSAGE: &str = "uncaught exception occurred!";

/// Launch `A` against `tokens` (default: the process arguments minus the
/// program name), printing to stdout and logging through `tracing`.
///
/// `Err` carries only unclassified faults; every other outcome is an
/// [`ExitStatus`].
pub fn main<A: Application>(tokens: Option<Vec<String>>) -> Result<ExitStatus, AppError> {
    logging::init();
    interrupt::install();
    let tokens = match tokens {
        Some(tokens) => tokens,
        None => match process_tokens(std::env::args_os().skip(1)) {
            Ok(tokens) => tokens,
            Err(err) => {
                logging::critical(&err.to_string());
                return Ok(ExitStatus::BadArgument);
            }
        },
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    main_with::<A, _, _>(tokens, &mut out, logging::critical)
}

/// Convert raw process arguments to tokens. Arguments that are not valid
/// UTF-8 are rejected.
pub fn process_tokens<I>(args: I) -> Result<Vec<String>, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                CliError::ArgumentRejected(format!(
                    "argument is not valid UTF-8: {}",
                    raw.to_string_lossy()
                ))
            })
        })
        .collect()
}

/// [`main`] with injected output and critical-log sinks.
///
/// Clears the interrupt flag first, so an interrupt seen by an earlier
/// dispatch in the same process does not leak into this one. Panics raised
/// while constructing or running the application are treated as unclassified
/// faults: logged, then resumed. Failing to print usage or help text is an
/// unclassified fault too.
pub fn main_with<A, W, L>(
    tokens: Vec<String>,
    out: &mut W,
    critical: L,
) -> Result<ExitStatus, AppError>
where
    A: Application,
    W: Write,
    L: Fn(&str),
{
    interrupt::reset();
    if tokens.is_empty() && !A::ALLOW_NOARGS {
        return print_usage(out, A::interface().usage_text(), &critical);
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| construct_and_run::<A>(&tokens)));
    let result = match outcome {
        Ok(result) => result,
        Err(payload) => {
            critical(FAULT_MESSAGE);
            panic::resume_unwind(payload);
        }
    };

    match result {
        Ok(()) => Ok(ExitStatus::Success),
        Err(AppError::HelpRequested(text)) => print_usage(out, &text, &critical),
        Err(AppError::ArgumentRejected(message)) => {
            critical(&message);
            Ok(ExitStatus::BadArgument)
        }
        Err(AppError::Interrupted) => {
            critical(INTERRUPT_MESSAGE);
            Ok(ExitStatus::KeyboardInterrupt)
        }
        Err(fault) => {
            critical(FAULT_MESSAGE);
            Err(fault)
        }
    }
}

fn print_usage<W, L>(out: &mut W, text: &str, critical: &L) -> Result<ExitStatus, AppError>
where
    W: Write,
    L: Fn(&str),
{
    match writeln!(out, "{text}").and_then(|()| out.flush()) {
        Ok(()) => Ok(ExitStatus::Usage),
        Err(err) => {
            critical(FAULT_MESSAGE);
            Err(err.into())
        }
    }
}

fn construct_and_run<A: Application>(tokens: &[String]) -> Result<(), AppError> {
    let mut app = A::from_cmdline(tokens)?;
    debug!(tokens = tokens.len(), "application constructed");
    app.run()?;
    // An interrupt delivered before `run()` returned still counts.
    interrupt::check()
}

/// Entry point for `fn main() -> ExitCode`.
///
/// An unclassified fault is reported on stderr and resumed as a panic, so
/// the process terminates abnormally instead of with a catalog code.
pub fn exit<A: Application>() -> ExitCode {
    match main::<A>(None) {
        Ok(status) => status.into(),
        Err(fault) => {
            eprintln!("Error: {fault}");
            panic::resume_unwind(Box::new(fault));
        }
    }
}
