//! Cooperative interrupt handling.
//!
//! The Ctrl-C handler only raises a process-wide flag. Long-running `run()`
//! implementations poll [`check`]; the dispatcher also consults the flag once
//! `run()` returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use tracing::warn;

use crate::error::AppError;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Register the Ctrl-C handler. Only the first call has an effect; returns
/// whether a handler is active.
pub fn install() -> bool {
    *INSTALLED.get_or_init(|| match ctrlc::set_handler(raise) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "failed to install interrupt handler");
            false
        }
    })
}

/// Mark the process as interrupted.
pub fn raise() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// `Err(AppError::Interrupted)` once an interrupt has arrived.
pub fn check() -> Result<(), AppError> {
    if requested() {
        Err(AppError::Interrupted)
    } else {
        Ok(())
    }
}

/// Clear the flag. Every dispatch starts by calling this.
pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}
