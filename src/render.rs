//! Rendering backend - terminal output and cursor management
//!
//! Output is write-buffered to minimize syscalls; call `flush()` (or
//! `end_frame()`) after a batch of operations to display it.

use crate::terminal::TerminalContext;
use anyhow::Result;
use std::io::{self, BufWriter, Write};

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

enum Target {
    Terminal(BufWriter<io::Stdout>),
    /// In-memory sink for tests and headless rendering
    Headless(Vec<u8>),
}

impl Target {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Target::Terminal(w) => w,
            Target::Headless(buf) => buf,
        }
    }
}

/// Raw terminal renderer handling buffered output
pub struct Renderer {
    target: Target,
    context: TerminalContext,
    in_alt_screen: bool,
}

impl Renderer {
    /// Create a new renderer writing to the current terminal
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        let stdout = io::stdout();
        let writer = BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, stdout);

        Ok(Renderer {
            target: Target::Terminal(writer),
            context,
            in_alt_screen: false,
        })
    }

    /// Create a headless renderer writing to an in-memory buffer
    pub fn headless() -> Self {
        Renderer {
            target: Target::Headless(Vec::new()),
            context: TerminalContext::headless(120, 40),
            in_alt_screen: false,
        }
    }

    /// Enter alternative screen buffer
    ///
    /// Flushes immediately so the screen switch happens before further output.
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.target.writer(), "\x1b[?1049h")?;
            self.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.target.writer(), "\x1b[?1049l")?;
            self.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        write!(self.target.writer(), "\x1b[2J")?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.target.writer(), "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    /// Hide cursor
    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.target.writer(), "\x1b[?25l")?;
        Ok(())
    }

    /// Show cursor
    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.target.writer(), "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        write!(self.target.writer(), "{}", text)?;
        Ok(())
    }

    /// Write text with ANSI color/style codes, resetting afterwards
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        write!(self.target.writer(), "{}{}\x1b[0m", style, text)?;
        Ok(())
    }

    /// Write a repeated character
    #[inline]
    pub fn write_repeated(&mut self, ch: char, count: usize) -> Result<()> {
        for _ in 0..count {
            write!(self.target.writer(), "{}", ch)?;
        }
        Ok(())
    }

    /// Flush output buffer to the target
    pub fn flush(&mut self) -> Result<()> {
        self.target.writer().flush()?;
        Ok(())
    }

    /// Get current terminal context
    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        if matches!(self.target, Target::Terminal(_)) {
            self.context.refresh_geometry()?;
        }
        Ok(())
    }

    /// Begin a render frame - hides the cursor
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()?;
        Ok(())
    }

    /// End a render frame - shows the cursor and flushes output
    pub fn end_frame(&mut self) -> Result<()> {
        self.show_cursor()?;
        self.flush()?;
        Ok(())
    }

    /// Check if the renderer is in alternative screen mode
    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }

    /// Contents written so far (headless targets only)
    pub fn headless_output(&self) -> Option<&[u8]> {
        match &self.target {
            Target::Headless(buf) => Some(buf),
            Target::Terminal(_) => None,
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore terminal state even on panic paths
        let _ = self.exit_alt_screen();
        let _ = self.show_cursor();
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_capture() {
        let mut renderer = Renderer::headless();
        renderer.move_cursor(0, 0).unwrap();
        renderer.write_text("hello").unwrap();

        let output = renderer.headless_output().unwrap();
        let text = String::from_utf8_lossy(output);
        assert!(text.contains("hello"));
        assert!(text.contains("\x1b[1;1H"));
    }

    #[test]
    fn test_styled_write_resets() {
        let mut renderer = Renderer::headless();
        renderer.write_styled("cell", "\x1b[7m").unwrap();

        let text = String::from_utf8_lossy(renderer.headless_output().unwrap()).to_string();
        assert!(text.starts_with("\x1b[7mcell\x1b[0m"));
    }
}
