use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::AggregatorResult;

/// Replace `path` with `content`.
///
/// The bytes are written to a temporary file next to the destination and
/// renamed over it, so readers see either the previous or the new document.
pub fn write_atomic(path: &Path, content: &[u8]) -> AggregatorResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Temp files are created owner-only; the published feed is world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.xml");

        write_atomic(&path, b"<rss/>").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"<rss/>");
    }

    #[test]
    fn test_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.xml");
        std::fs::write(&path, "a much longer previous document").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // Only the destination remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("feed.xml");

        assert!(write_atomic(&path, b"<rss/>").is_err());
        assert!(!path.exists());
    }
}
