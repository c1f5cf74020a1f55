//! The launch sequence.
//!
//! Linear, one conditional branch, no retries: resolve the bundle root,
//! enter it, re-run post-install configuration if the bundle moved,
//! then start the target detached under the native-toolchain
//! environment. Every failure maps to its own exit status; a
//! half-launched bundle must never silently continue.

use std::env;
use std::path::Path;

use stirrup_core::cmdline;
use stirrup_core::config::LauncherManifest;
use stirrup_core::env::{EnvVariant, build};
use stirrup_platform::{Spawner, StartRequest, Visibility, launcher_dir};
use stirrup_state::RelocationTracker;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot resolve the launcher directory")]
    Resolve(#[source] stirrup_platform::Error),

    #[error("cannot enter the launcher directory {dir}")]
    Chdir {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot check the bundle location record")]
    Record(#[source] stirrup_state::Error),

    #[error("post-install configuration did not run")]
    Configure(#[source] stirrup_platform::Error),

    #[error("cannot record the configured location")]
    RecordWrite(#[source] stirrup_state::Error),

    #[error("cannot build the target command line")]
    Expand(#[source] stirrup_core::Error),

    #[error("cannot start the target")]
    Start(#[source] stirrup_platform::Error),
}

impl LaunchError {
    /// Distinct status per fatal condition, for diagnosability. Grouped
    /// by decade: 1x resolution, 2x location record, 3x configuration
    /// run, 4x expansion, 5x target start.
    pub fn exit_code(&self) -> i32 {
        use stirrup_platform::Error as Platform;
        use stirrup_state::Error as State;
        match self {
            Self::Resolve(Platform::NoParentDir(_)) => 11,
            Self::Resolve(_) => 10,
            Self::Chdir { .. } => 12,
            Self::Record(State::Read(_)) => 20,
            Self::Record(State::Oversized { .. }) => 21,
            Self::Record(State::Malformed) => 22,
            Self::Record(_) | Self::RecordWrite(_) => 23,
            Self::Configure(_) => 30,
            Self::Expand(_) => 40,
            Self::Start(_) => 50,
        }
    }
}

/// Resolve the bundle root, enter it, and launch.
pub fn run<S: Spawner>(
    manifest: &LauncherManifest,
    args: &[String],
    spawner: &S,
) -> Result<(), LaunchError> {
    let dir = launcher_dir().map_err(LaunchError::Resolve)?;
    // Everything downstream (the record file, the bundled shell, the
    // target path) resolves relative to the bundle root.
    env::set_current_dir(&dir).map_err(|source| LaunchError::Chdir {
        dir: dir.display().to_string(),
        source,
    })?;
    launch_from(manifest, &dir, args, spawner)
}

/// Steps 3-7, from a known bundle root.
pub fn launch_from<S: Spawner>(
    manifest: &LauncherManifest,
    install_dir: &Path,
    args: &[String],
    spawner: &S,
) -> Result<(), LaunchError> {
    let install_str = install_dir.to_string_lossy();
    let tracker = RelocationTracker::new(install_dir.join(&manifest.state_file));

    let configured = tracker
        .is_configured(&install_str)
        .map_err(LaunchError::Record)?;
    if !configured {
        configure(manifest, install_dir, &install_str, &tracker, spawner)?;
    }

    let cmdline = cmdline::expand(manifest, args).map_err(LaunchError::Expand)?;
    let request = StartRequest {
        cmdline,
        env: build(EnvVariant::NativeToolchain, &install_str),
        title: manifest.app_id.clone(),
        visibility: if manifest.terminal {
            Visibility::Visible
        } else {
            Visibility::Hidden
        },
        cwd: install_dir.to_path_buf(),
    };
    // Fire and forget: the target's lifetime is not our concern.
    spawner.start_detached(&request).map_err(LaunchError::Start)
}

/// Run the post-install script in the bundled shell, visibly, blocking
/// until it exits, then record the location it ran at. The record is
/// only ever written after the script has finished, so the native
/// launch can never overtake configuration.
fn configure<S: Spawner>(
    manifest: &LauncherManifest,
    install_dir: &Path,
    install_str: &str,
    tracker: &RelocationTracker,
    spawner: &S,
) -> Result<(), LaunchError> {
    let request = StartRequest {
        cmdline: cmdline::postinst_invocation(manifest),
        env: build(EnvVariant::Interpreter, install_str),
        title: manifest.postinst.clone(),
        visibility: Visibility::Visible,
        cwd: install_dir.to_path_buf(),
    };
    spawner
        .run_to_completion(&request)
        .map_err(LaunchError::Configure)?;
    tracker
        .mark_configured(install_str)
        .map_err(LaunchError::RecordWrite)
}
