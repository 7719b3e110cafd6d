use std::path::Path;

/// Compute the BLAKE3 hash of a byte slice, returning the hex-encoded digest.
#[must_use]
pub fn blake3_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// A short (8 hex chars) content digest, suitable for cache-busting file names.
#[must_use]
pub fn short_hash(data: &[u8]) -> String {
    blake3_bytes(data)[..8].to_string()
}

/// Compute the BLAKE3 hash of a file, returning the hex-encoded digest.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn blake3_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(blake3_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_blake3_bytes_stable() {
        let hash1 = blake3_bytes(b".x{color:red}");
        let hash2 = blake3_bytes(b".x{color:red}");
        let hash3 = blake3_bytes(b".x{color:blue}");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_short_hash_length() {
        assert_eq!(short_hash(b"anything").len(), 8);
    }

    #[test]
    fn test_blake3_file_matches_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        file.flush().unwrap();

        assert_eq!(blake3_file(file.path()).unwrap(), blake3_bytes(b"hello world"));
    }

    #[test]
    fn test_blake3_file_not_found() {
        assert!(blake3_file(Path::new("/nonexistent/file")).is_err());
    }
}
