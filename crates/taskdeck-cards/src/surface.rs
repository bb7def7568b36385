//! Rendering surfaces the card view can draw into.

use std::path::{Path, PathBuf};
use taskdeck_core::TaskdeckResult;
use taskdeck_persistence::AtomicWriter;

/// An embedded HTML renderer. Implementations live with the host that owns
/// the actual window; inbound messages arrive through a `BridgeSender`.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface {
    /// Replace the whole page.
    fn set_html(&mut self, html: &str) -> TaskdeckResult<()>;

    /// Run a script in the page. No return value is read back.
    fn run_script(&mut self, script: &str) -> TaskdeckResult<()>;

    /// Surfaces that cannot execute scripts get a full page on every update.
    fn supports_scripts(&self) -> bool {
        true
    }
}

/// Writes the page to a file, for opening in a browser.
#[derive(Debug, Clone)]
pub struct HtmlFileSurface {
    path: PathBuf,
}

impl HtmlFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSurface for HtmlFileSurface {
    fn set_html(&mut self, html: &str) -> TaskdeckResult<()> {
        AtomicWriter::write_atomic(&self.path, html.as_bytes())?;
        tracing::debug!("Wrote card view to {}", self.path.display());
        Ok(())
    }

    fn run_script(&mut self, script: &str) -> TaskdeckResult<()> {
        tracing::trace!("File surface skips script: {}", script);
        Ok(())
    }

    fn supports_scripts(&self) -> bool {
        false
    }
}
