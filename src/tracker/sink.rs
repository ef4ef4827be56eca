use std::io::Write;

use anyhow::Result;

#[cfg(test)]
use mockall::automock;

/// Append-only line-oriented output surface. Stands in for the host's output channel, so tests
/// can capture report lines instead of a terminal.
#[cfg_attr(test, automock)]
pub trait LineSink: Send + 'static {
    fn append(&mut self, line: &str) -> Result<()>;
}

/// Writer-backed [LineSink]. Flushes after every line since report lines are the main user
/// surface and may race a host reading our stdout.
pub struct OutputChannel<W> {
    writer: W,
}

impl<W: Write + Send + 'static> OutputChannel<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + 'static> LineSink for OutputChannel<W> {
    fn append(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}
