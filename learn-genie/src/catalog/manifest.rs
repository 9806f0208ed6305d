//! Locating the Genie ops manifest on the control node.

use std::path::PathBuf;
use std::process::Stdio;

use log::debug;
use tokio::process::Command;

use crate::config::EngineConfig;
use crate::error::CatalogError;

/// Asks the interpreter where `genie.libs.ops` is installed and prints the
/// path of the manifest next to it.
pub const DISCOVERY_SCRIPT: &str = "import importlib.util, pathlib; \
spec = importlib.util.find_spec('genie.libs.ops'); \
print(pathlib.Path(spec.origin).parent.joinpath('ops.json'))";

/// Resolve the manifest path.
///
/// An explicit path in the configuration wins; otherwise the configured
/// Python interpreter is asked where Genie is installed.
pub async fn locate_manifest(config: &EngineConfig) -> Result<PathBuf, CatalogError> {
    if let Some(path) = &config.ops_manifest {
        return Ok(path.clone());
    }

    let python = config.python_bin.display().to_string();
    debug!("discovering ops manifest with {python}");

    let output = Command::new(&config.python_bin)
        .arg("-c")
        .arg(DISCOVERY_SCRIPT)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| CatalogError::ManifestNotFound {
            message: format!("failed to run {python}: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CatalogError::ManifestNotFound {
            message: format!(
                "You must have PyATS/Genie packages installed for {python}: {}",
                stderr.trim()
            ),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout.trim();
    if path.is_empty() {
        return Err(CatalogError::ManifestNotFound {
            message: format!("{python} did not report a manifest path"),
        });
    }

    Ok(PathBuf::from(path))
}
