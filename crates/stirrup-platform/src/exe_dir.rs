use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Directory containing the running launcher executable.
///
/// This is the bundle root: the stub sits next to the bundle's payload
/// directories, and every downstream path is resolved relative to it. A
/// parentless executable path means the environment is broken beyond
/// anything the launcher could repair.
pub fn launcher_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(Error::ExePath)?;
    let dir = exe
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| Error::NoParentDir(exe.display().to_string()))?;
    Ok(dir.to_path_buf())
}
