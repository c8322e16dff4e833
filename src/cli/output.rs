//! Colored terminal output for step progress and results.
//!
//! User-facing progress goes through [`OutputManager`]; diagnostic detail
//! goes to `log`. Colors degrade automatically when stdout is not a tty.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Leveled, colored writer for user-facing messages.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a manager with the given verbosity flags.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn colored(&self, msg: &str, color: Color, bold: bool) -> io::Result<()> {
        let mut stream = StandardStream::stdout(ColorChoice::Auto);
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
        writeln!(stream, "{}", msg)?;
        stream.reset()
    }

    /// Section header for one step of the sequence.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.colored(&format!("==> {}", title), Color::Cyan, true)
    }

    /// Progress line inside a section.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        println!("    {}", message);
        Ok(())
    }

    /// Indented informational line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.progress(message)
    }

    /// Successful completion of a step.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.colored(&format!("    ✓ {}", message), Color::Green, false)
    }

    /// Non-fatal condition the user should see (skips, best-effort failures).
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.colored(&format!("    warning: {}", message), Color::Yellow, false)
    }

    /// Extra detail, shown only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        println!("    {}", message);
        Ok(())
    }
}
