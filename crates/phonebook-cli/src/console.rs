//! Line-oriented console I/O used by the shell.
//!
//! [`IoConsole`] talks to the terminal (see [`StdConsole`]) or any other
//! byte stream; [`ScriptedConsole`] replays canned
//! input and records everything written, for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Prompted line input and line output.
pub trait Console {
    /// Show `prompt` and read one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write one line of output.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

// ============================================================================
// IoConsole
// ============================================================================

/// Console over any buffered reader and writer.
///
/// Input is decoded lossily, so bytes that are not valid UTF-8 become
/// `U+FFFD` instead of failing the read.
#[derive(Debug)]
pub struct IoConsole<R, W> {
    reader: R,
    writer: W,
    buf: Vec<u8>,
}

/// Console over the process's stdin and stdout.
pub type StdConsole = IoConsole<io::StdinLock<'static>, io::Stdout>;

impl StdConsole {
    /// Creates a console bound to the standard streams.
    pub fn stdio() -> Self {
        IoConsole::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    /// Creates a console reading from `reader` and writing to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: Vec::new(),
        }
    }

    /// Consume the console, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes())?;
        self.writer.flush()?;

        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(strip_line_ending(&line).to_string()))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

// ============================================================================
// ScriptedConsole
// ============================================================================

/// Console fed from a fixed list of input lines.
///
/// Prompts and output lines are both captured in [`transcript`](Self::transcript).
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    /// Creates a console that will answer prompts with `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written so far, one entry per prompt or line.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Output joined with newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Input lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
