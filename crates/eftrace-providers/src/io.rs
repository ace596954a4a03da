use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::Result;

/// Raw file content handed to a parser
#[derive(Debug, Clone)]
pub struct LogFile {
    /// Display path, also used as the parsed result's `file_path`
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub size: u64,
}

/// A file that could not be read or parsed; the batch carries on without it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub name: String,
    pub reason: String,
}

/// Progress of a read batch, reported after every file
#[derive(Debug, Clone, Copy)]
pub struct ReadProgress<'a> {
    pub done: usize,
    pub total: usize,
    pub name: &'a str,
}

#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub files: Vec<LogFile>,
    pub failures: Vec<FileFailure>,
}

/// Read a whole file; invalid UTF-8 is replaced rather than rejected
pub fn read_log_file(path: &Path) -> Result<LogFile> {
    let bytes = std::fs::read(path)?;
    let size = bytes.len() as u64;
    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };

    Ok(LogFile {
        name: path.to_string_lossy().into_owned(),
        path: path.to_path_buf(),
        content,
        size,
    })
}

/// Read many files, skipping (and recording) the ones that fail or exceed `max_size`
pub fn read_log_files<F>(paths: &[PathBuf], max_size: u64, mut on_progress: F) -> ReadOutcome
where
    F: FnMut(ReadProgress<'_>),
{
    let mut outcome = ReadOutcome::default();
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        let name = path.to_string_lossy().into_owned();

        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > max_size => {
                tracing::warn!(file = %name, size = meta.len(), max_size, "skipping oversized file");
                outcome.failures.push(FileFailure {
                    name: name.clone(),
                    reason: format!("file exceeds {} bytes", max_size),
                });
            }
            _ => match read_log_file(path) {
                Ok(file) => outcome.files.push(file),
                Err(err) => {
                    tracing::warn!(file = %name, error = %err, "skipping unreadable file");
                    outcome.failures.push(FileFailure {
                        name: name.clone(),
                        reason: err.to_string(),
                    });
                }
            },
        }

        on_progress(ReadProgress {
            done: index + 1,
            total,
            name: &name,
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_log_files_records_failures() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let good = temp.path().join("backend_000.log");
        let big = temp.path().join("errors_000.log");
        let missing = temp.path().join("missing.log");
        std::fs::write(&good, "hello")?;
        std::fs::write(&big, "0123456789")?;

        let mut seen = Vec::new();
        let outcome = read_log_files(&[good.clone(), big, missing], 8, |p| {
            seen.push((p.done, p.total))
        });

        assert_eq!(outcome.files.len(), 1);
        assert_eq!(outcome.files[0].content, "hello");
        assert_eq!(outcome.files[0].size, 5);
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_replaced() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("backend_000.log");
        std::fs::write(&path, [b'o', b'k', 0xff])?;

        let file = read_log_file(&path)?;
        assert!(file.content.starts_with("ok"));
        assert_eq!(file.size, 3);
        Ok(())
    }
}
