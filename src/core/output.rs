use std::io::Write;

/// Destination of the human-readable progress lines.
pub trait MessageSink: Send + Sync {
    fn emit(&self, line: &str) -> std::io::Result<()>;
}

/// Writes each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn emit(&self, line: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}
