use std::io::{self, Write};

use anyhow::{Context, Result};

/// Capability seam between the session runner and whatever is being typed
/// into. Implementations receive one call per keystroke, in playback order.
///
/// Errors are treated as fatal by the runner: the first failing call aborts
/// the session.
pub trait TextSurface {
    fn insert_char(&mut self, ch: char) -> Result<()>;

    /// Remove the most recently inserted character, if any.
    fn delete_last(&mut self) -> Result<()>;
}

/// Echoes the session into the terminal. Inserts print the character;
/// deletions rub out the previous one with backspace-space-backspace.
#[derive(Debug, Default)]
pub struct TerminalSurface;

impl TextSurface for TerminalSurface {
    fn insert_char(&mut self, ch: char) -> Result<()> {
        let mut out = io::stdout();
        write!(out, "{ch}").context("failed to write to stdout")?;
        out.flush().context("failed to flush stdout")?;
        Ok(())
    }

    fn delete_last(&mut self) -> Result<()> {
        let mut out = io::stdout();
        write!(out, "\u{8} \u{8}").context("failed to write to stdout")?;
        out.flush().context("failed to flush stdout")?;
        Ok(())
    }
}

/// In-memory surface for tests and offline inspection.
#[derive(Debug, Default)]
pub struct BufferSurface {
    buf: Vec<char>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.buf.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl TextSurface for BufferSurface {
    fn insert_char(&mut self, ch: char) -> Result<()> {
        self.buf.push(ch);
        Ok(())
    }

    fn delete_last(&mut self) -> Result<()> {
        self.buf.pop();
        Ok(())
    }
}
