// Operator interrupt tracking
//
// A single process-wide flag set from the Ctrl-C handler. The shell and
// launcher consult it after a tool returns to map an operator interrupt to
// exit code 130; rustyline reports Ctrl-C at prompts on its own.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the Ctrl-C handler. Call once at startup.
pub fn install() -> Result<()> {
    ctrlc::set_handler(|| {
        INTERRUPTED.store(true, Ordering::SeqCst);
    })?;
    Ok(())
}

/// Whether an interrupt arrived since the last `reset`.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Clear the flag before starting a new tool execution.
pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_roundtrip() {
        reset();
        assert!(!interrupted());
        INTERRUPTED.store(true, Ordering::SeqCst);
        assert!(interrupted());
        reset();
        assert!(!interrupted());
    }
}
