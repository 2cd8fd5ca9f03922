//! Disk-backed filesystem adapter.

use std::path::Path;

use crate::ports::{BoxError, FileSystem};

/// Real disk I/O with atomic replacement on write.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        // Temp file in the same directory so the rename stays on one filesystem.
        let file_name = path
            .file_name()
            .ok_or_else(|| format!("not a file path: {}", path.display()))?
            .to_string_lossy();
        let tmp = dir.join(format!(".tmp_{}_{file_name}", std::process::id()));

        if let Err(e) = std::fs::write(&tmp, contents) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), BoxError> {
        Ok(std::fs::create_dir_all(path)?)
    }
}
