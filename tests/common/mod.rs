use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated scratch area for one test: clips, output and config home.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        std::fs::create_dir_all(temp_dir.path().join("config"))?;
        std::fs::create_dir_all(temp_dir.path().join("clips"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Used as XDG_CONFIG_HOME so tests never touch the real config
    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn clip(&self, name: &str) -> PathBuf {
        self.path().join("clips").join(name)
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.path().join("out").join(name)
    }
}
