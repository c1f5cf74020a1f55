//! Environment variable deltas for the two launch phases.
//!
//! The bundle carries a full MSYS2 installation. The post-install
//! configuration script runs under the interpreter-style environment
//! (`MSYSTEM=MSYS2`, shell utilities on PATH); the target runs under the
//! native-toolchain environment, where the MinGW bin directory must come
//! first so natively-compiled binaries shadow same-named shell ones.
//!
//! A delta is data, not an effect: it is merged into the child's
//! inherited environment at the process-start seam, never written into
//! this process. `HOME` and everything else stay untouched.

pub const MODE_VAR: &str = "MSYSTEM";
pub const PATH_VAR: &str = "PATH";

const INTERPRETER_MODE: &str = "MSYS2";
const NATIVE_MODE: &str = "MINGW64";

const INTERPRETER_BIN_SUBPATH: &str = r"\usr\bin";
const NATIVE_BIN_SUBPATH: &str = r"\mingw64\bin";
const PATH_LIST_SEP: char = ';';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvVariant {
    Interpreter,
    NativeToolchain,
}

/// Ordered set of variables to merge into a child's environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentDelta {
    vars: Vec<(String, String)>,
}

impl EnvironmentDelta {
    fn set(&mut self, name: &str, value: String) {
        self.vars.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

pub fn build(variant: EnvVariant, install_dir: &str) -> EnvironmentDelta {
    let mut delta = EnvironmentDelta::default();
    match variant {
        EnvVariant::Interpreter => {
            delta.set(MODE_VAR, INTERPRETER_MODE.to_string());
            let mut path = String::from(install_dir);
            path.push_str(INTERPRETER_BIN_SUBPATH);
            delta.set(PATH_VAR, path);
        }
        EnvVariant::NativeToolchain => {
            delta.set(MODE_VAR, NATIVE_MODE.to_string());
            // Native bin dir first: its binaries must win over the
            // interpreter's when names collide.
            let mut path = String::from(install_dir);
            path.push_str(NATIVE_BIN_SUBPATH);
            path.push(PATH_LIST_SEP);
            path.push_str(install_dir);
            path.push_str(INTERPRETER_BIN_SUBPATH);
            delta.set(PATH_VAR, path);
        }
    }
    delta
}
