//! Process exit status catalog.
//!
//! These values are part of the external contract: shell scripts branch on
//! them, so a published value must never be renumbered.

use std::fmt;
use std::process::ExitCode;

/// Named termination classes returned to the operating environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExitStatus {
    /// Normal completion.
    Success = 0,
    /// No or insufficient arguments, or help explicitly requested.
    Usage = 1,
    /// The parser rejected the supplied arguments.
    BadArgument = 2,
    /// Reserved for configuration-layer failures.
    BadConfig = 3,
    /// An interrupt was received during execution.
    KeyboardInterrupt = 4,
    /// Reserved for business-logic failures signaled by applications.
    RuntimeError = 5,
}

impl ExitStatus {
    /// Every catalog member, in ascending code order.
    pub const ALL: [ExitStatus; 6] = [
        Self::Success,
        Self::Usage,
        Self::BadArgument,
        Self::BadConfig,
        Self::KeyboardInterrupt,
        Self::RuntimeError,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::BadArgument => "bad_argument",
            Self::BadConfig => "bad_config",
            Self::KeyboardInterrupt => "keyboard_interrupt",
            Self::RuntimeError => "runtime_error",
        }
    }

    /// Reverse lookup from a raw code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<ExitStatus> for i32 {
    fn from(status: ExitStatus) -> Self {
        i32::from(status.code())
    }
}
