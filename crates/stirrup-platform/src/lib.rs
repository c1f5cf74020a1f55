//! OS seams for the launcher.
//!
//! Two thin collaborators live here: finding the directory the launcher
//! runs from, and turning a built [`StartRequest`] into a real child
//! process. Everything above this crate is pure and testable; everything
//! below it is the operating system.

pub use error::{Error, Result};
pub use exe_dir::launcher_dir;
pub use proc::{OsSpawner, Spawner, StartRequest, Visibility};

mod error;
mod exe_dir;
mod proc;
