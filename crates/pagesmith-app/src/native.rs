//! Native file delivery.

use pagesmith_render::{Download, ExportError, ExportResult};
use std::path::{Path, PathBuf};

/// Saves artifacts as files in a directory.
#[derive(Debug, Clone)]
pub struct FileDownload {
    dir: PathBuf,
}

impl FileDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Download for FileDownload {
    fn save(&mut self, file_name: &str, _mime_type: &str, bytes: &[u8]) -> ExportResult<()> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).map_err(|e| ExportError::Delivery {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}
