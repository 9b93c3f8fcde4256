//! Chart configuration and the rendered-chart handle.

use scry_error::Result;
use std::path::{Path, PathBuf};

/// Display options forwarded to the rendering layer.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Fill color as an RGB triple; the default palette applies when absent.
    pub color: Option<(u8, u8, u8)>,
    /// When set, the rendered SVG is also written to this path.
    pub output: Option<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            width: 800,
            height: 600,
            color: None,
            output: None,
        }
    }
}

/// A rendered chart: the SVG document, ready to display or save.
#[derive(Debug, Clone)]
pub struct Chart {
    pub svg: String,
}

impl Chart {
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.svg)?;
        Ok(())
    }
}
