//! Sample log folders for integration tests.
//!
//! The canonical sample session lives in `crates/eftrace-providers/tests/samples/`
//! and is copied into a temporary directory so tests can add or break files.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Session prefix of the bundled sample folder
pub const SAMPLE_SESSION: &str = "2024.03.12_14-22-58_0.14.1.2.29197";

/// Temporary copy of the sample logs
pub struct SampleFiles {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl SampleFiles {
    /// Copy the bundled sample session into a fresh temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("Logs");
        let dest = root.join(format!("log_{}", SAMPLE_SESSION));
        fs::create_dir_all(&dest)?;

        for entry in fs::read_dir(Self::samples_dir())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::copy(entry.path(), dest.join(entry.file_name()))?;
            }
        }

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    fn samples_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .expect("crates directory")
            .join("eftrace-providers/tests/samples")
            .join(format!("log_{}", SAMPLE_SESSION))
    }

    /// Directory containing the `log_<session>` folders
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder of the sample session itself
    pub fn session_dir(&self) -> PathBuf {
        self.root.join(format!("log_{}", SAMPLE_SESSION))
    }

    /// Write an extra file next to the samples, e.g. a corrupt log
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.session_dir().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a second session folder with the given files
    pub fn add_session(&self, prefix: &str, files: &[(&str, &str)]) -> Result<PathBuf> {
        let dir = self.root.join(format!("log_{}", prefix));
        fs::create_dir_all(&dir)?;
        for (log_type, content) in files {
            fs::write(dir.join(format!("{} {}_000.log", prefix, log_type)), content)?;
        }
        Ok(dir)
    }
}
