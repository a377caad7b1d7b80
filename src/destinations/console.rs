//! Console destination implementation

use crate::core::{Destination, Result, Severity};
use std::io::Write;

/// Writes one JSON record per line to the terminal
///
/// `Error` and `Critical` records go to stderr, everything else to stdout.
/// `stderr_only` sends everything to stderr, keeping stdout free for program
/// output.
pub struct ConsoleDestination {
    stderr_only: bool,
}

impl ConsoleDestination {
    pub fn new() -> Self {
        Self { stderr_only: false }
    }

    pub fn stderr() -> Self {
        Self { stderr_only: true }
    }

    fn uses_stderr(&self, severity: Severity) -> bool {
        self.stderr_only || severity >= Severity::Error
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::new()
    }
}

impl Destination for ConsoleDestination {
    fn write(&mut self, severity: Severity, payload: &str) -> Result<()> {
        if self.uses_stderr(severity) {
            writeln!(std::io::stderr().lock(), "{}", payload)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", payload)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_routing() {
        let console = ConsoleDestination::new();
        assert!(!console.uses_stderr(Severity::Info));
        assert!(!console.uses_stderr(Severity::Warning));
        assert!(console.uses_stderr(Severity::Error));
        assert!(console.uses_stderr(Severity::Critical));

        assert!(ConsoleDestination::stderr().uses_stderr(Severity::Info));
    }

    #[test]
    fn test_write_does_not_fail() -> Result<()> {
        let mut console = ConsoleDestination::new();
        console.write(Severity::Info, r#"{"event":"console test"}"#)?;
        console.flush()
    }
}
