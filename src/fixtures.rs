use std::path::{Path, PathBuf};

use tracing::debug;


pub const TESTS_DIR_ENV: &str = "AMQP_CODEC_TESTS_DIR";

const FIXTURE_SUBDIR: &str = "interop";
const FIXTURE_EXTENSION: &str = "amqp";


#[derive(thiserror::Error, Debug)]
pub enum FixtureError {
    #[error("can't open {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("no tests directory given and AMQP_CODEC_TESTS_DIR is not set")]
    NoTestsDir,
}


/// A tests directory holding encoded fixtures under `interop/<name>.amqp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    pub fn new(root: impl Into<PathBuf>) -> FixtureDir {
        FixtureDir { root: root.into() }
    }

    pub fn from_env() -> Result<FixtureDir, FixtureError> {
        std::env::var_os(TESTS_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(FixtureDir::new)
            .ok_or(FixtureError::NoTestsDir)
    }

    /// An explicit directory wins over the environment.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<FixtureDir, FixtureError> {
        match explicit {
            Some(root) => Ok(FixtureDir::new(root)),
            None       => FixtureDir::from_env(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        let mut path = self.root.join(FIXTURE_SUBDIR).join(name);
        path.set_extension(FIXTURE_EXTENSION);
        path
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>, FixtureError> {
        let path = self.path(name);
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(fixture = name, path = %path.display(), len = bytes.len(), "loaded fixture");
                Ok(bytes)
            },
            Err(source) => Err(FixtureError::Read { path, source }),
        }
    }
}
