use std::fs;
use std::io;
use std::path::Path;

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The file stem of a path, or `fallback` when the path has none.
#[must_use]
pub fn file_stem_or<'a>(path: &'a Path, fallback: &'a str) -> &'a str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_to_string_lossy_valid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b".x{color:red}").unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert_eq!(content, ".x{color:red}");
    }

    #[test]
    fn test_read_to_string_lossy_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        // Valid start, then invalid continuation bytes
        file.write_all(&[0x2e, 0x78, 0x80, 0x81]).unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert!(content.starts_with(".x"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_file_stem_or() {
        assert_eq!(file_stem_or(Path::new("/a/button.module.css"), "style"), "button.module");
        assert_eq!(file_stem_or(Path::new("/"), "style"), "style");
    }
}
