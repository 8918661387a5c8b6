//! Terminal abstraction - geometry and capability detection

use anyhow::{Context, Result};

/// Terminal geometry in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Terminal width in columns (characters)
    pub cols: u16,
    /// Terminal height in rows (lines)
    pub rows: u16,
}

impl TerminalGeometry {
    /// Get current terminal geometry
    pub fn detect() -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
        Ok(TerminalGeometry { cols, rows })
    }

    /// Fixed geometry for headless use
    pub fn fixed(cols: u16, rows: u16) -> Self {
        TerminalGeometry { cols, rows }
    }
}

/// Terminal capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Supports mouse events
    pub mouse: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from the environment
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();

        let truecolor = colorterm.contains("truecolor") || colorterm.contains("24bit");
        let colors_256 = term.contains("256") || truecolor;

        TerminalCapabilities {
            truecolor,
            colors_256,
            // Most modern terminals support this
            mouse: true,
        }
    }

    /// Everything on; for headless rendering in tests
    pub fn full() -> Self {
        TerminalCapabilities {
            truecolor: true,
            colors_256: true,
            mouse: true,
        }
    }
}

/// Complete terminal context combining geometry and capabilities
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Create a new terminal context by detecting current environment
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Fixed-size context with full capabilities, for headless use
    pub fn headless(cols: u16, rows: u16) -> Self {
        TerminalContext {
            geometry: TerminalGeometry::fixed(cols, rows),
            capabilities: TerminalCapabilities::full(),
        }
    }

    /// Refresh geometry (e.g., after terminal resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }

    /// Get character dimensions
    pub fn char_dimensions(&self) -> (u16, u16) {
        (self.geometry.cols, self.geometry.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_geometry() {
        let geom = TerminalGeometry::fixed(80, 24);
        assert_eq!(geom.cols, 80);
        assert_eq!(geom.rows, 24);
    }

    #[test]
    fn test_capabilities_detect() {
        let caps = TerminalCapabilities::detect();
        // 256-color support is implied by truecolor
        assert!(caps.colors_256 || !caps.truecolor);
    }
}
