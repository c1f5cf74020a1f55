//! Child-process start requests and the spawner seam.
//!
//! The orchestrator never touches `std::process` directly; it builds a
//! [`StartRequest`] and hands it to a [`Spawner`]. The real
//! [`OsSpawner`] maps requests onto `Command`; tests substitute a
//! recording fake.

use std::path::PathBuf;
use std::process::Command;

use stirrup_core::cmdline::CommandLine;
use stirrup_core::env::EnvironmentDelta;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// One child process the launcher wants started.
#[derive(Clone, Debug)]
pub struct StartRequest {
    pub cmdline: CommandLine,
    /// Merged into the child's inherited environment; never applied to
    /// the launcher's own.
    pub env: EnvironmentDelta,
    /// Window title hint for the child.
    pub title: String,
    pub visibility: Visibility,
    /// Working directory for the child (the bundle root).
    pub cwd: PathBuf,
}

pub trait Spawner {
    /// Start the child visibly and block until it exits. Used for the
    /// one-time configuration run; its exit status is deliberately not
    /// inspected.
    fn run_to_completion(&self, request: &StartRequest) -> Result<()>;

    /// Start the child and return immediately. The launcher's job ends
    /// the moment the target is running.
    fn start_detached(&self, request: &StartRequest) -> Result<()>;
}

pub struct OsSpawner;

impl OsSpawner {
    fn command(request: &StartRequest) -> Command {
        let mut cmd = Command::new(request.cmdline.program());
        cmd.envs(request.env.iter());
        cmd.current_dir(&request.cwd);
        apply_args(&mut cmd, &request.cmdline);
        apply_visibility(&mut cmd, request.visibility);
        cmd
    }
}

impl Spawner for OsSpawner {
    fn run_to_completion(&self, request: &StartRequest) -> Result<()> {
        let cmd_name = request.cmdline.program().to_string();
        let mut child =
            Self::command(request)
                .spawn()
                .map_err(|source| Error::Spawn {
                    cmd: cmd_name.clone(),
                    source,
                })?;
        child.wait().map_err(|source| Error::Wait {
            cmd: cmd_name,
            source,
        })?;
        Ok(())
    }

    fn start_detached(&self, request: &StartRequest) -> Result<()> {
        Self::command(request)
            .spawn()
            .map(drop)
            .map_err(|source| Error::Spawn {
                cmd: request.cmdline.program().to_string(),
                source,
            })
    }
}

/// Pass the argument tail through unsplit so the child parses the exact
/// line the expander built.
#[cfg(windows)]
fn apply_args(cmd: &mut Command, cmdline: &CommandLine) {
    use std::os::windows::process::CommandExt;
    if !cmdline.args_tail().is_empty() {
        cmd.raw_arg(cmdline.args_tail());
    }
}

/// Non-Windows builds exist for development and tests only; the bundled
/// shell does its own word splitting there anyway.
#[cfg(not(windows))]
fn apply_args(cmd: &mut Command, cmdline: &CommandLine) {
    cmd.args(cmdline.args_tail().split_whitespace());
}

#[cfg(windows)]
fn apply_visibility(cmd: &mut Command, visibility: Visibility) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;

    if visibility == Visibility::Hidden {
        cmd.creation_flags(DETACHED_PROCESS | CREATE_NO_WINDOW);
    }
}

#[cfg(not(windows))]
fn apply_visibility(_cmd: &mut Command, _visibility: Visibility) {}
