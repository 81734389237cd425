use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// What a spawner hands back: the OS process id and, when the spawner owns a
/// real child, the `Child` used for later liveness checks.
#[derive(Debug)]
pub struct SpawnedProcess {
    pub pid: u32,
    pub child: Option<Child>,
}

/// Starts the materialized executable. The host never waits on the result.
pub trait ProcessSpawner {
    fn spawn(&self, path: &Path) -> io::Result<SpawnedProcess>;
}

/// Spawns the sidecar with its standard streams on the null device, in its own
/// process group, so terminal signals and output stay with the host UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn(&self, path: &Path) -> io::Result<SpawnedProcess> {
        let mut cmd = Command::new(path);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);

        let child = cmd.spawn()?;
        Ok(SpawnedProcess {
            pid: child.id(),
            child: Some(child),
        })
    }
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NO_WINDOW);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

/// A launched sidecar instance. Only the launcher that created it may query
/// or stop it.
#[derive(Debug)]
pub struct SidecarHandle {
    pid: u32,
    path: PathBuf,
    child: Option<Child>,
    alive: bool,
}

impl SidecarHandle {
    pub(crate) fn new(spawned: SpawnedProcess, path: PathBuf) -> Self {
        Self {
            pid: spawned.pid,
            path,
            child: spawned.child,
            alive: true,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Location of the materialized executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Refresh and return the liveness flag. Without a child to poll the last
    /// known state is returned as-is.
    pub(crate) fn poll_alive(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(None) => {}
                Ok(Some(_)) | Err(_) => self.alive = false,
            }
        }
        self.alive
    }

    /// Kill the process if it is still running and reap it.
    pub(crate) fn terminate(&mut self) -> io::Result<()> {
        if !self.poll_alive() {
            return Ok(());
        }
        if let Some(child) = self.child.as_mut() {
            child.kill()?;
            child.wait()?;
        }
        self.alive = false;
        Ok(())
    }
}
