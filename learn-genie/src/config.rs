//! Engine configuration.
//!
//! Describes where the Genie tooling lives on the control node. Values
//! default to whatever is on `PATH` and can be overridden from the
//! environment the automation engine runs the module in.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the `genie` executable.
pub const ENV_GENIE_BIN: &str = "GENIE_BIN";

/// Environment variable naming the Python interpreter Genie is installed in.
pub const ENV_GENIE_PYTHON: &str = "GENIE_PYTHON";

/// Environment variable pointing directly at the `ops.json` manifest.
pub const ENV_OPS_MANIFEST: &str = "GENIE_OPS_MANIFEST";

/// Environment variable selecting the parent directory for session workspaces.
pub const ENV_WORK_DIR: &str = "GENIE_WORK_DIR";

/// Environment variable toggling hostname learning on connect.
pub const ENV_LEARN_HOSTNAME: &str = "GENIE_LEARN_HOSTNAME";

/// Configuration for the Genie learning engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The `genie` command line executable.
    pub genie_bin: PathBuf,

    /// Python interpreter used to discover the ops manifest.
    pub python_bin: PathBuf,

    /// Explicit path to the `ops.json` manifest (discovered when `None`).
    pub ops_manifest: Option<PathBuf>,

    /// Parent directory for temporary session workspaces (system temp when `None`).
    pub work_dir: Option<PathBuf>,

    /// Ask Genie to learn the device hostname when connecting.
    pub learn_hostname: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            genie_bin: PathBuf::from("genie"),
            python_bin: PathBuf::from("python3"),
            ops_manifest: None,
            work_dir: None,
            learn_hostname: true,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let set = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(bin) = set(ENV_GENIE_BIN) {
            config.genie_bin = PathBuf::from(bin);
        }
        if let Some(python) = set(ENV_GENIE_PYTHON) {
            config.python_bin = PathBuf::from(python);
        }
        config.ops_manifest = set(ENV_OPS_MANIFEST).map(PathBuf::from);
        config.work_dir = set(ENV_WORK_DIR).map(PathBuf::from);
        if let Some(flag) = set(ENV_LEARN_HOSTNAME) {
            config.learn_hostname = !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        config
    }

    /// Set the `genie` executable.
    pub fn genie_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.genie_bin = path.into();
        self
    }

    /// Set the Python interpreter.
    pub fn python_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.python_bin = path.into();
        self
    }

    /// Use an explicit manifest instead of discovering it.
    pub fn ops_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.ops_manifest = Some(path.into());
        self
    }

    /// Set the parent directory for session workspaces.
    pub fn work_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(path.into());
        self
    }

    /// Enable or disable hostname learning.
    pub fn learn_hostname(mut self, enabled: bool) -> Self {
        self.learn_hostname = enabled;
        self
    }
}
