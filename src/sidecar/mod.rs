//! Background helper bootstrap. The helper binary ships inside our own
//! executable; at startup it is written to a temp file, marked executable and
//! started detached. Nothing here is allowed to take the application down:
//! every failure is logged and the app carries on without a sidecar.

mod fs;
mod process;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};

pub use fs::{PayloadFs, TempDirFs};
pub use process::{DetachedSpawner, ProcessSpawner, SidecarHandle, SpawnedProcess};

/// Helper executable bundled at build time.
pub static EMBEDDED_SIDECAR: &[u8] = include_bytes!("../../assets/shuffler.sh");

/// Steps of the bootstrap that abort it. Failing to mark the file executable
/// is only logged, so it has no variant.
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("failed to create temp file for sidecar")]
    CreateTemp(#[source] io::Error),
    #[error("failed to write sidecar payload to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to start sidecar {}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Materialize `payload` and start it. On a write or spawn failure the
/// partial file is removed before the error is returned.
pub fn launch(
    fs: &dyn PayloadFs,
    spawner: &dyn ProcessSpawner,
    payload: &[u8],
) -> Result<SidecarHandle, SidecarError> {
    let path = fs.create_temp().map_err(SidecarError::CreateTemp)?;

    if let Err(source) = fs.write_payload(&path, payload) {
        discard(fs, &path);
        return Err(SidecarError::Write { path, source });
    }

    if let Err(err) = fs.mark_executable(&path) {
        warn!(path = %path.display(), error = %err, "failed to mark sidecar executable");
    }

    match spawner.spawn(&path) {
        Ok(spawned) => Ok(SidecarHandle::new(spawned, path)),
        Err(source) => {
            discard(fs, &path);
            Err(SidecarError::Spawn { path, source })
        }
    }
}

fn discard(fs: &dyn PayloadFs, path: &Path) {
    if let Err(err) = fs.remove(path) {
        debug!(path = %path.display(), error = %err, "could not remove sidecar temp file");
    }
}

/// Owns the (at most one) sidecar for the lifetime of the application.
pub struct Launcher {
    fs: Box<dyn PayloadFs>,
    spawner: Box<dyn ProcessSpawner>,
    payload: &'static [u8],
    keep_on_shutdown: bool,
    handle: Option<SidecarHandle>,
}

impl Launcher {
    /// Launcher for the bundled helper using the system temp dir.
    pub fn new(keep_on_shutdown: bool) -> Self {
        Self::with_parts(
            Box::new(TempDirFs::new()),
            Box::new(DetachedSpawner),
            EMBEDDED_SIDECAR,
            keep_on_shutdown,
        )
    }

    pub fn with_parts(
        fs: Box<dyn PayloadFs>,
        spawner: Box<dyn ProcessSpawner>,
        payload: &'static [u8],
        keep_on_shutdown: bool,
    ) -> Self {
        Self {
            fs,
            spawner,
            payload,
            keep_on_shutdown,
            handle: None,
        }
    }

    /// Start the sidecar once. Failures are logged, never returned.
    pub fn bootstrap(&mut self) {
        if let Some(handle) = &self.handle {
            warn!(pid = handle.pid(), "sidecar already running, ignoring bootstrap");
            return;
        }

        match launch(self.fs.as_ref(), self.spawner.as_ref(), self.payload) {
            Ok(handle) => {
                info!(
                    pid = handle.pid(),
                    path = %handle.path().display(),
                    "started embedded sidecar process"
                );
                self.handle = Some(handle);
            }
            Err(err) => {
                let cause = std::error::Error::source(&err)
                    .map(|source| source.to_string())
                    .unwrap_or_default();
                error!(error = %err, cause = %cause, "sidecar bootstrap failed");
            }
        }
    }

    pub fn handle(&self) -> Option<&SidecarHandle> {
        self.handle.as_ref()
    }

    /// Whether a sidecar was started and has not exited since.
    pub fn is_running(&mut self) -> bool {
        self.handle
            .as_mut()
            .is_some_and(|handle| handle.poll_alive())
    }

    /// Release the sidecar. Unless configured to keep it, the process is
    /// stopped and its temp file deleted; either way the handle is dropped.
    pub fn shutdown(&mut self) {
        let Some(mut handle) = self.handle.take() else {
            return;
        };

        if self.keep_on_shutdown {
            info!(
                pid = handle.pid(),
                path = %handle.path().display(),
                "leaving sidecar running after exit"
            );
            return;
        }

        if let Err(err) = handle.terminate() {
            warn!(pid = handle.pid(), error = %err, "failed to stop sidecar");
        }
        if let Err(err) = self.fs.remove(handle.path()) {
            warn!(path = %handle.path().display(), error = %err, "failed to remove sidecar temp file");
        } else {
            debug!(pid = handle.pid(), "sidecar stopped and cleaned up");
        }
    }
}

impl Drop for Launcher {
    fn drop(&mut self) {
        if self.handle.is_some() {
            warn!("sidecar launcher dropped without shutdown(), sidecar left behind");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Create,
        Write,
        Chmod,
        Spawn,
        Remove,
    }

    /// Records every call and fails the configured step.
    #[derive(Clone, Default)]
    struct FakeFs {
        calls: Rc<RefCell<Vec<Step>>>,
        fail: Option<Step>,
    }

    impl FakeFs {
        fn failing(step: Step) -> Self {
            Self {
                fail: Some(step),
                ..Self::default()
            }
        }

        fn record(&self, step: Step) -> io::Result<()> {
            self.calls.borrow_mut().push(step);
            if self.fail == Some(step) {
                Err(io::Error::new(io::ErrorKind::Other, "injected failure"))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<Step> {
            self.calls.borrow().clone()
        }
    }

    impl PayloadFs for FakeFs {
        fn create_temp(&self) -> io::Result<PathBuf> {
            self.record(Step::Create)?;
            Ok(PathBuf::from("/fake/embedded-cmd-1"))
        }

        fn write_payload(&self, _path: &Path, _payload: &[u8]) -> io::Result<()> {
            self.record(Step::Write)
        }

        fn mark_executable(&self, _path: &Path) -> io::Result<()> {
            self.record(Step::Chmod)
        }

        fn remove(&self, _path: &Path) -> io::Result<()> {
            self.record(Step::Remove)
        }
    }

    /// Pretends to start a process, recording into the same log as the fs.
    #[derive(Clone)]
    struct FakeSpawner {
        calls: Rc<RefCell<Vec<Step>>>,
        fail: bool,
        saw_existing_file: Rc<Cell<bool>>,
    }

    impl FakeSpawner {
        fn sharing(fs: &FakeFs) -> Self {
            Self {
                calls: Rc::clone(&fs.calls),
                fail: false,
                saw_existing_file: Rc::new(Cell::new(false)),
            }
        }
    }

    impl ProcessSpawner for FakeSpawner {
        fn spawn(&self, path: &Path) -> io::Result<SpawnedProcess> {
            self.calls.borrow_mut().push(Step::Spawn);
            self.saw_existing_file.set(path.exists());
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
            }
            Ok(SpawnedProcess {
                pid: 4242,
                child: None,
            })
        }
    }

    const PAYLOAD: &[u8] = b"#!/bin/sh\nexit 0\n";

    #[test]
    fn happy_path_runs_every_step_in_order() {
        let fs = FakeFs::default();
        let spawner = FakeSpawner::sharing(&fs);

        let handle = launch(&fs, &spawner, PAYLOAD).unwrap();

        assert_eq!(handle.pid(), 4242);
        assert_eq!(handle.path(), Path::new("/fake/embedded-cmd-1"));
        assert_eq!(
            fs.calls(),
            vec![Step::Create, Step::Write, Step::Chmod, Step::Spawn]
        );
    }

    #[test]
    fn create_failure_touches_nothing_else() {
        let fs = FakeFs::failing(Step::Create);
        let spawner = FakeSpawner::sharing(&fs);

        let err = launch(&fs, &spawner, PAYLOAD).unwrap_err();

        assert!(matches!(err, SidecarError::CreateTemp(_)));
        assert_eq!(fs.calls(), vec![Step::Create]);
    }

    #[test]
    fn write_failure_removes_file_and_never_spawns() {
        let fs = FakeFs::failing(Step::Write);
        let spawner = FakeSpawner::sharing(&fs);

        let err = launch(&fs, &spawner, PAYLOAD).unwrap_err();

        assert!(matches!(err, SidecarError::Write { .. }));
        assert_eq!(fs.calls(), vec![Step::Create, Step::Write, Step::Remove]);
    }

    #[test]
    fn chmod_failure_is_not_fatal() {
        let fs = FakeFs::failing(Step::Chmod);
        let spawner = FakeSpawner::sharing(&fs);

        let handle = launch(&fs, &spawner, PAYLOAD).unwrap();

        assert_eq!(handle.pid(), 4242);
        assert_eq!(
            fs.calls(),
            vec![Step::Create, Step::Write, Step::Chmod, Step::Spawn]
        );
    }

    #[test]
    fn spawn_failure_removes_file() {
        let fs = FakeFs::default();
        let mut spawner = FakeSpawner::sharing(&fs);
        spawner.fail = true;

        let err = launch(&fs, &spawner, PAYLOAD).unwrap_err();

        assert!(matches!(err, SidecarError::Spawn { .. }));
        assert_eq!(
            fs.calls(),
            vec![Step::Create, Step::Write, Step::Chmod, Step::Spawn, Step::Remove]
        );
    }

    #[test]
    fn real_fs_file_exists_when_spawned() {
        let dir = TempDir::new().unwrap();
        let fs = TempDirFs::in_dir(dir.path());
        let spawner = FakeSpawner::sharing(&FakeFs::default());

        let handle = launch(&fs, &spawner, PAYLOAD).unwrap();

        assert!(handle.pid() > 0);
        assert!(spawner.saw_existing_file.get());
        assert_eq!(std::fs::read(handle.path()).unwrap(), PAYLOAD);
    }

    #[test]
    fn real_fs_write_failure_leaves_no_file() {
        /// Real temp files, but writing always fails.
        struct BrokenWriter(TempDirFs);

        impl PayloadFs for BrokenWriter {
            fn create_temp(&self) -> io::Result<PathBuf> {
                self.0.create_temp()
            }
            fn write_payload(&self, _path: &Path, _payload: &[u8]) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn mark_executable(&self, path: &Path) -> io::Result<()> {
                self.0.mark_executable(path)
            }
            fn remove(&self, path: &Path) -> io::Result<()> {
                self.0.remove(path)
            }
        }

        let dir = TempDir::new().unwrap();
        let fs = BrokenWriter(TempDirFs::in_dir(dir.path()));
        let spawner = FakeSpawner::sharing(&FakeFs::default());

        let err = launch(&fs, &spawner, PAYLOAD).unwrap_err();

        let path = match err {
            SidecarError::Write { path, .. } => path,
            other => panic!("expected a write error, got {other:?}"),
        };
        assert!(!path.exists());
        assert!(spawner.calls.borrow().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    fn launcher(fs: &FakeFs, spawner: &FakeSpawner, keep_on_shutdown: bool) -> Launcher {
        Launcher::with_parts(
            Box::new(fs.clone()),
            Box::new(spawner.clone()),
            PAYLOAD,
            keep_on_shutdown,
        )
    }

    #[test]
    fn bootstrap_failure_leaves_launcher_idle() {
        let fs = FakeFs::failing(Step::Write);
        let spawner = FakeSpawner::sharing(&fs);
        let mut launcher = launcher(&fs, &spawner, false);

        launcher.bootstrap();

        assert!(launcher.handle().is_none());
        assert!(!launcher.is_running());
        assert!(!fs.calls().contains(&Step::Spawn));
    }

    #[test]
    fn bootstrap_is_not_reentrant() {
        let fs = FakeFs::default();
        let spawner = FakeSpawner::sharing(&fs);
        let mut launcher = launcher(&fs, &spawner, false);

        launcher.bootstrap();
        launcher.bootstrap();

        let spawns = fs.calls().iter().filter(|s| **s == Step::Spawn).count();
        assert_eq!(spawns, 1);
        assert_eq!(launcher.handle().map(SidecarHandle::pid), Some(4242));
        assert!(launcher.is_running());
        launcher.shutdown();
    }

    #[test]
    fn shutdown_removes_temp_file_by_default() {
        let fs = FakeFs::default();
        let spawner = FakeSpawner::sharing(&fs);
        let mut launcher = launcher(&fs, &spawner, false);

        launcher.bootstrap();
        launcher.shutdown();

        assert!(launcher.handle().is_none());
        assert_eq!(fs.calls().last(), Some(&Step::Remove));
    }

    #[test]
    fn shutdown_keeps_sidecar_when_asked() {
        let fs = FakeFs::default();
        let spawner = FakeSpawner::sharing(&fs);
        let mut launcher = launcher(&fs, &spawner, true);

        launcher.bootstrap();
        launcher.shutdown();

        assert!(launcher.handle().is_none());
        assert!(!fs.calls().contains(&Step::Remove));
    }

    #[test]
    fn shutdown_without_bootstrap_is_a_no_op() {
        let fs = FakeFs::default();
        let spawner = FakeSpawner::sharing(&fs);
        let mut launcher = launcher(&fs, &spawner, false);

        launcher.shutdown();

        assert!(fs.calls().is_empty());
    }
}
