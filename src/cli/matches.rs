//! `clap::ArgMatches` → [`Namespace`] conversion.

use std::any::Any;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;

use crate::namespace::Namespace;

/// Key under which the selected subcommand name is stored.
pub(super) const SUBCOMMAND_KEY: &str = "command";

/// One entry per declared argument; help/version actions are skipped.
/// A selected subcommand adds `command = <name>` plus a nested table.
pub(super) fn to_namespace(command: &Command, matches: &ArgMatches) -> Namespace {
    let mut ns = Namespace::new();
    for arg in command.get_arguments() {
        if is_display_action(arg.get_action()) {
            continue;
        }
        ns.insert(arg.get_id().as_str(), value_of(arg, matches));
    }
    if let Some((name, sub_matches)) = matches.subcommand() {
        ns.insert(SUBCOMMAND_KEY, name);
        if let Some(sub_command) = command.find_subcommand(name) {
            ns.insert(
                name,
                Value::Object(to_namespace(sub_command, sub_matches).into_map()),
            );
        }
    }
    ns
}

fn is_display_action(action: &ArgAction) -> bool {
    matches!(
        action,
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}

fn takes_many(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append)
        || arg
            .get_num_args()
            .is_some_and(|range| range.max_values() > 1)
}

enum Probe {
    Absent,
    Found(Vec<Value>),
    WrongType,
}

type Prober = fn(&ArgMatches, &str) -> Probe;

/// Value types tried in order; the first that matches the argument's
/// value parser wins.
const PROBES: &[Prober] = &[
    probe::<String>,
    probe::<bool>,
    probe::<u8>,
    probe::<u16>,
    probe::<u32>,
    probe::<u64>,
    probe::<usize>,
    probe::<i8>,
    probe::<i16>,
    probe::<i32>,
    probe::<i64>,
    probe::<f32>,
    probe::<f64>,
    probe_path,
    probe_os_string,
];

fn value_of(arg: &Arg, matches: &ArgMatches) -> Value {
    let id = arg.get_id().as_str();
    let values = PROBES
        .iter()
        .find_map(|probe| match probe(matches, id) {
            Probe::WrongType => None,
            found => Some(found),
        })
        .unwrap_or_else(|| raw_values(matches, id));

    match values {
        Probe::Found(values) if takes_many(arg) => Value::Array(values),
        Probe::Found(mut values) if values.len() == 1 => values.remove(0),
        Probe::Found(values) => Value::Array(values),
        Probe::Absent if takes_many(arg) => Value::Array(Vec::new()),
        Probe::Absent | Probe::WrongType => Value::Null,
    }
}

fn probe<T>(matches: &ArgMatches, id: &str) -> Probe
where
    T: Any + Clone + Send + Sync + 'static,
    Value: From<T>,
{
    match matches.try_get_many::<T>(id) {
        Ok(Some(values)) => Probe::Found(values.cloned().map(Value::from).collect()),
        Ok(None) => Probe::Absent,
        Err(_) => Probe::WrongType,
    }
}

fn probe_path(matches: &ArgMatches, id: &str) -> Probe {
    match matches.try_get_many::<PathBuf>(id) {
        Ok(Some(values)) => Probe::Found(
            values
                .map(|path| Value::String(path.to_string_lossy().into_owned()))
                .collect(),
        ),
        Ok(None) => Probe::Absent,
        Err(_) => Probe::WrongType,
    }
}

fn probe_os_string(matches: &ArgMatches, id: &str) -> Probe {
    match matches.try_get_many::<OsString>(id) {
        Ok(Some(values)) => Probe::Found(
            values
                .map(|raw| Value::String(raw.to_string_lossy().into_owned()))
                .collect(),
        ),
        Ok(None) => Probe::Absent,
        Err(_) => Probe::WrongType,
    }
}

/// Last resort for custom value types: the tokens as typed.
fn raw_values(matches: &ArgMatches, id: &str) -> Probe {
    match matches.try_get_raw(id) {
        Ok(Some(raw)) => Probe::Found(
            raw.map(|value| Value::String(value.to_string_lossy().into_owned()))
                .collect(),
        ),
        Ok(None) => Probe::Absent,
        Err(_) => Probe::WrongType,
    }
}
