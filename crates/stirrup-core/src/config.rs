//! The build-time launcher manifest.
//!
//! One compiled stub serves one desktop entry; everything that varies
//! between stubs (target, Exec template, flags, titles) lives in a small
//! TOML document embedded at build time. Parsing it once at startup into
//! an immutable struct keeps the rest of the launcher free of globals.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherManifest {
    /// Application identity, used as the window title hint for the
    /// target process.
    pub app_id: String,

    /// Human-readable name, echoed by the terminal helper form.
    pub title: String,

    /// Route the launch through the bundled shell instead of starting
    /// the target executable directly.
    pub use_helper: bool,

    /// Keep a console window attached to the target (desktop-entry
    /// `Terminal=true`).
    pub terminal: bool,

    /// Resolved target path, relative to the bundle root. Required
    /// (and only used) when `use_helper` is false.
    #[serde(default)]
    pub target_exe: String,

    /// Tokenized Exec line. The first token names the target; the rest
    /// are literal arguments or the `%f`/`%F`/`%u`/`%U` substitutions.
    pub exec_template: Vec<String>,

    /// Post-install configuration script, as the bundled shell sees it.
    pub postinst: String,

    /// Basename of the location record, relative to the bundle root.
    pub state_file: String,
}

impl LauncherManifest {
    pub fn from_toml(doc: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(doc)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.use_helper {
            if self.exec_template.is_empty() {
                return Err(Error::ManifestInvalid(
                    "helper launches need a non-empty exec_template".into(),
                ));
            }
        } else if self.target_exe.is_empty() {
            return Err(Error::ManifestInvalid(
                "direct launches need target_exe".into(),
            ));
        }
        if self.state_file.is_empty() {
            return Err(Error::ManifestInvalid("state_file must be set".into()));
        }
        // The title is interpolated into a single-quoted shell word by
        // the terminal helper form.
        if self.title.contains('\'') {
            return Err(Error::ManifestInvalid(
                "title must not contain a single quote".into(),
            ));
        }
        Ok(())
    }
}
