use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Prefix for the materialized sidecar executable inside the temp directory.
const TEMP_PREFIX: &str = "embedded-cmd-";

/// Filesystem steps needed to turn the embedded payload into something the OS
/// can execute. Split out so tests can fail any single step on demand.
pub trait PayloadFs {
    /// Create an empty, uniquely named file and return its path.
    fn create_temp(&self) -> io::Result<PathBuf>;
    fn write_payload(&self, path: &Path, payload: &[u8]) -> io::Result<()>;
    fn mark_executable(&self, path: &Path) -> io::Result<()>;
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem backend rooted at a temp directory (the system one unless
/// told otherwise).
#[derive(Debug, Clone)]
pub struct TempDirFs {
    dir: PathBuf,
}

impl TempDirFs {
    pub fn new() -> Self {
        Self::in_dir(env::temp_dir())
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for TempDirFs {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadFs for TempDirFs {
    fn create_temp(&self) -> io::Result<PathBuf> {
        // Kept on disk and closed here; exec fails with ETXTBSY while a
        // write handle is still open.
        tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(env::consts::EXE_SUFFIX)
            .tempfile_in(&self.dir)?
            .into_temp_path()
            .keep()
            .map_err(|err| err.error)
    }

    fn write_payload(&self, path: &Path, payload: &[u8]) -> io::Result<()> {
        fs::write(path, payload)
    }

    #[cfg(unix)]
    fn mark_executable(&self, path: &Path) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
    }

    #[cfg(not(unix))]
    fn mark_executable(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
