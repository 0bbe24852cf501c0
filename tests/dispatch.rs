//! End-to-end dispatcher behavior with a clap-backed application.

use std::cell::RefCell;
use std::path::PathBuf;

use clap::Parser;
use cmdkit::app::dispatch::{main_with, FAULT_MESSAGE, INTERRUPT_MESSAGE};
use cmdkit::app::Application;
use cmdkit::cli::ClapInterface;
use cmdkit::{AppError, ExitStatus};
use serde::Deserialize;

/// Copy a file, optionally in upper case.
#[derive(Debug, Parser, Deserialize)]
#[command(name = "copy")]
struct CopyFile {
    /// Source file.
    source: PathBuf,
    #[arg(long)]
    upper: bool,
    /// Simulated failure mode.
    #[arg(long, value_parser = ["none", "interrupt", "fault"], default_value = "none")]
    fail: String,
}

impl Application for CopyFile {
    type Cli = ClapInterface;

    fn interface() -> ClapInterface {
        ClapInterface::of::<CopyFile>()
    }

    fn run(&mut self) -> Result<(), AppError> {
        match self.fail.as_str() {
            "interrupt" => Err(AppError::Interrupted),
            "fault" => Err(AppError::fault(format!(
                "cannot read {}",
                self.source.display()
            ))),
            _ => Ok(()),
        }
    }
}

/// Lists the current directory; nothing is required.
#[derive(Debug, Parser, Deserialize)]
#[command(name = "list")]
struct List {
    #[arg(long)]
    all: bool,
}

impl Application for List {
    type Cli = ClapInterface;
    const ALLOW_NOARGS: bool = true;

    fn interface() -> ClapInterface {
        ClapInterface::of::<List>()
    }

    fn run(&mut self) -> Result<(), AppError> {
        Ok(())
    }
}

struct Outcome {
    result: Result<ExitStatus, AppError>,
    stdout: String,
    logs: Vec<String>,
}

fn launch<A: Application>(raw: &[&str]) -> Outcome {
    let tokens = raw.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    let logs = RefCell::new(Vec::new());
    let result = main_with::<A, _, _>(tokens, &mut out, |msg| {
        logs.borrow_mut().push(msg.to_string())
    });
    Outcome {
        result,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        logs: logs.into_inner(),
    }
}

#[test]
fn no_tokens_prints_usage_and_exits_usage() {
    let outcome = launch::<CopyFile>(&[]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::Usage);
    assert!(outcome.stdout.starts_with("Usage: copy"), "got: {}", outcome.stdout);
    assert!(outcome.logs.is_empty());
}

#[test]
fn no_tokens_runs_when_allowed() {
    let outcome = launch::<List>(&[]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::Success);
    assert!(outcome.stdout.is_empty());
}

#[test]
fn valid_invocation_succeeds() {
    let outcome = launch::<CopyFile>(&["notes.txt", "--upper"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::Success);
    assert!(outcome.logs.is_empty());
}

#[test]
fn help_flag_prints_help_and_exits_usage() {
    let outcome = launch::<CopyFile>(&["--help"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::Usage);
    assert!(outcome.stdout.contains("Copy a file"), "got: {}", outcome.stdout);
    assert!(outcome.logs.is_empty());
}

#[test]
fn help_wins_over_missing_required_argument() {
    let outcome = launch::<CopyFile>(&["--fail", "fault", "--help"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::Usage);
}

#[test]
fn unknown_flag_is_bad_argument() {
    let outcome = launch::<CopyFile>(&["--unknown-flag"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::BadArgument);
    assert_eq!(outcome.logs.len(), 1);
    assert!(outcome.logs[0].contains("--unknown-flag"), "got: {:?}", outcome.logs);
    assert!(outcome.stdout.is_empty());
}

#[test]
fn missing_required_argument_is_bad_argument() {
    let outcome = launch::<CopyFile>(&["--upper"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::BadArgument);
    assert_eq!(outcome.logs.len(), 1);
}

#[test]
fn invalid_choice_never_reaches_run() {
    let outcome = launch::<CopyFile>(&["a.txt", "--fail", "sometimes"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::BadArgument);
}

#[test]
fn interrupt_in_run_is_keyboard_interrupt() {
    let outcome = launch::<CopyFile>(&["a.txt", "--fail", "interrupt"]);
    assert_eq!(outcome.result.unwrap(), ExitStatus::KeyboardInterrupt);
    assert_eq!(outcome.logs, [INTERRUPT_MESSAGE]);
}

#[test]
fn application_fault_is_not_mapped_to_a_status() {
    let outcome = launch::<CopyFile>(&["a.txt", "--fail", "fault"]);
    let err = outcome.result.unwrap_err();
    assert_eq!(err.to_string(), "cannot read a.txt");
    assert_eq!(outcome.logs, [FAULT_MESSAGE]);
}

#[test]
fn repeated_construction_is_identical() {
    let tokens: Vec<String> = ["x.txt", "--upper"].iter().map(|s| s.to_string()).collect();
    let first = CopyFile::from_cmdline(&tokens).unwrap();
    let second = CopyFile::from_cmdline(&tokens).unwrap();
    assert_eq!(first.source, second.source);
    assert_eq!(first.upper, second.upper);
    assert_eq!(first.fail, second.fail);
}
