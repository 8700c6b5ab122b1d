//! Input handling for file reading and stdin support.

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::PathBuf;

/// A dump read from disk or stdin, kept as raw bytes.
#[derive(Debug, Clone)]
pub struct DumpSource {
    /// Display name (`<stdin>` or the file path).
    pub name: String,
    /// Path the dump came from; `None` for stdin.
    pub path: Option<PathBuf>,
    pub content: Vec<u8>,
}

/// Read dumps from files or stdin.
///
/// If no files are provided, reads from stdin.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<DumpSource>> {
    if files.is_empty() {
        read_from_stdin()
    } else {
        read_from_files(files)
    }
}

/// Read a dump from stdin
fn read_from_stdin() -> Result<Vec<DumpSource>> {
    let mut content = Vec::new();
    io::stdin()
        .read_to_end(&mut content)
        .context("Failed to read from stdin")?;

    Ok(vec![DumpSource {
        name: "<stdin>".to_string(),
        path: None,
        content,
    }])
}

/// Read dumps from multiple files
fn read_from_files(files: &[PathBuf]) -> Result<Vec<DumpSource>> {
    files
        .iter()
        .map(|path| {
            let content = std::fs::read(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            Ok(DumpSource {
                name: path.display().to_string(),
                path: Some(path.clone()),
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_single_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "CREATE TABLE public.users ();").unwrap();

        let sources = read_from_files(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].content, b"CREATE TABLE public.users ();\n");
        assert_eq!(sources[0].path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_read_multiple_files() {
        let mut file1 = NamedTempFile::new().unwrap();
        let mut file2 = NamedTempFile::new().unwrap();
        writeln!(file1, "SELECT 1;").unwrap();
        writeln!(file2, "SELECT 2;").unwrap();

        let sources =
            read_from_files(&[file1.path().to_path_buf(), file2.path().to_path_buf()]).unwrap();
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_read_non_utf8_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"-- \xff\nSELECT 1;\n").unwrap();

        let sources = read_from_files(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(sources[0].content, b"-- \xff\nSELECT 1;\n");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_from_files(&[PathBuf::from("/nonexistent/file.sql")]);
        assert!(result.is_err());
    }
}
