use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is empty")]
    Empty(PathBuf),
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a word-list file to prefill the setup screen.
///
/// The text is returned as-is; splitting happens when the quiz starts.
pub fn load_word_file<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let bytes = read(path.as_ref())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read an image and encode it as plain base64 (no data-URL prefix).
pub fn load_image_base64<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    let bytes = read(path)?;
    if bytes.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    Ok(BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_word_file_round_trip() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_file(&dir, "words.txt", "apple\n快樂, run\n".as_bytes());
        assert_eq!(load_word_file(&path).unwrap(), "apple\n快樂, run\n");
    }

    #[test]
    fn test_image_is_plain_base64() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_file(&dir, "photo.jpg", &[0xFF, 0xD8, 0xFF, 0xE0]);
        let encoded = load_image_base64(&path).unwrap();
        assert_eq!(encoded, "/9j/4A==");
        assert!(!encoded.starts_with("data:"));
    }

    #[test]
    fn test_empty_image_rejected() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_file(&dir, "empty.jpg", b"");
        assert!(matches!(load_image_base64(&path), Err(LoadError::Empty(_))));
    }

    #[test]
    fn test_empty_word_file_is_fine() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_file(&dir, "empty.txt", b"");
        assert_eq!(load_word_file(&path).unwrap(), "");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("not-here.txt");
        let err = load_word_file(&path).unwrap_err();
        assert!(err.to_string().contains("not-here.txt"));
    }
}
