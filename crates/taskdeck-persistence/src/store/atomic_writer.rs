use std::io::Write;
use std::path::Path;
use taskdeck_core::TaskdeckResult;

/// Writes through a temp file in the target directory and renames it into
/// place, so a crash mid-write leaves the previous file intact.
pub struct AtomicWriter;

impl AtomicWriter {
    pub fn write_atomic(path: &Path, data: &[u8]) -> TaskdeckResult<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(data)?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    pub fn read_all(path: &Path) -> TaskdeckResult<Vec<u8>> {
        let data = std::fs::read(path)?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_overwrites_without_leftovers() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tasks.json");

        AtomicWriter::write_atomic(&file_path, b"First").unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").unwrap();

        assert_eq!(AtomicWriter::read_all(&file_path).unwrap(), b"Second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing").join("tasks.json");
        assert!(AtomicWriter::write_atomic(&file_path, b"data").is_err());
    }
}
