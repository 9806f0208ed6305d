//! Learning engine backed by the `genie` command line.
//!
//! `connect` stages a private workspace holding a one-device testbed;
//! `learn` runs `genie learn` against it and reads back the ops file the
//! command writes. Genie (through Unicon) opens and closes the device
//! connection itself within each learn.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use log::{debug, warn};
use serde_json::Value;
use tempfile::TempDir;
use tokio::process::Command;

use super::descriptor::DeviceDescriptor;
use super::session::{DeviceSession, LearnEngine};
use super::testbed::Testbed;
use crate::config::EngineConfig;
use crate::error::SessionError;

/// Testbed file name inside the session workspace.
const TESTBED_FILE: &str = "testbed.yaml";

/// Output that means Genie never got a usable CLI session.
pub const CONNECTION_FAILURE_MARKERS: &[&str] = &[
    "Failed while bringing device to",
    "failed to connect",
    "Failed to connect",
    "ConnectionError",
    "Authentication failed",
    "Permission denied",
    "Connection refused",
    "Connection timed out",
    "No route to host",
    "Could not resolve hostname",
    "Name or service not known",
];

/// Engine driving the `genie` executable.
#[derive(Debug, Clone)]
pub struct GenieCli {
    config: EngineConfig,
}

impl GenieCli {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn workspace(&self) -> std::io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("learn-genie-");
        match &self.config.work_dir {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        }
    }
}

impl LearnEngine for GenieCli {
    type Session = GenieSession;

    async fn connect(&self, device: &DeviceDescriptor) -> Result<GenieSession, SessionError> {
        // The workspace directory is created 0700; it holds the credentials.
        let workspace = self.workspace()?;
        let testbed_path = workspace.path().join(TESTBED_FILE);
        let document = Testbed::single(device)
            .to_json()
            .map_err(std::io::Error::other)?;
        tokio::fs::write(&testbed_path, document).await?;

        debug!(
            "staged testbed for {} in {}",
            device.address(),
            workspace.path().display()
        );

        Ok(GenieSession {
            workspace: Some(workspace),
            testbed_path,
            device_name: device.host.clone(),
            genie_bin: self.config.genie_bin.clone(),
            learn_hostname: self.config.learn_hostname,
        })
    }
}

/// A staged testbed waiting for `genie learn` runs.
///
/// Dropping the session removes the workspace; child processes are killed
/// when their future is dropped.
#[derive(Debug)]
pub struct GenieSession {
    /// `None` once disconnected.
    workspace: Option<TempDir>,
    testbed_path: PathBuf,
    device_name: String,
    genie_bin: PathBuf,
    learn_hostname: bool,
}

impl GenieSession {
    /// Path of the staged testbed file.
    pub fn testbed_path(&self) -> &Path {
        &self.testbed_path
    }

    fn learn_command(&self, feature: &str, output_dir: &Path) -> Command {
        let mut command = Command::new(&self.genie_bin);
        command
            .arg("learn")
            .arg(feature)
            .arg("--testbed-file")
            .arg(&self.testbed_path)
            .arg("--devices")
            .arg(&self.device_name)
            .arg("--output")
            .arg(output_dir);
        if self.learn_hostname {
            command.arg("--learn-hostname");
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl DeviceSession for GenieSession {
    async fn learn(&mut self, feature: &str) -> Result<Value, SessionError> {
        let workspace = self.workspace.as_ref().ok_or_else(|| SessionError::Connection {
            message: format!("Session to {} is already closed", self.device_name),
        })?;

        let output_dir = workspace.path().join(format!("{feature}-output"));
        tokio::fs::create_dir_all(&output_dir).await?;

        let output = self
            .learn_command(feature, &output_dir)
            .output()
            .await
            .map_err(|source| SessionError::Launch {
                program: self.genie_bin.display().to_string(),
                source,
            })?;
        debug!("genie learn {feature} exited with {}", output.status);

        if let Some(ops_file) = find_ops_file(&output_dir, feature).await? {
            return read_ops_file(&ops_file, feature, &self.device_name).await;
        }

        let mut transcript = read_exception_files(&output_dir).await?;
        if transcript.trim().is_empty() {
            transcript = String::from_utf8_lossy(&output.stderr).into_owned();
        }
        if transcript.trim().is_empty() {
            transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        Err(classify_failure(&transcript, output.status))
    }

    async fn disconnect(mut self) -> Result<(), SessionError> {
        if let Some(workspace) = self.workspace.take() {
            workspace.close()?;
        }
        Ok(())
    }
}

impl Drop for GenieSession {
    fn drop(&mut self) {
        if self.workspace.is_some() {
            warn!("GenieSession dropped without disconnect; removing workspace");
        }
    }
}

/// Locate `<feature>_*_ops.txt` in a `genie learn` output directory.
async fn find_ops_file(dir: &Path, feature: &str) -> std::io::Result<Option<PathBuf>> {
    let prefix = format!("{feature}_");
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with("_ops.txt") {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// Concatenated content of any exception reports Genie left behind.
async fn read_exception_files(dir: &Path) -> std::io::Result<String> {
    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_string_lossy().contains("exception") {
            paths.push(entry.path());
        }
    }
    paths.sort();

    // Reports may quote raw device output that is not valid UTF-8.
    let mut transcript = String::new();
    for path in paths {
        let bytes = tokio::fs::read(&path).await?;
        transcript.push_str(&String::from_utf8_lossy(&bytes));
    }
    Ok(transcript)
}

/// Parse an ops file and return its learned `info` structure.
async fn read_ops_file(path: &Path, feature: &str, device: &str) -> Result<Value, SessionError> {
    let content = tokio::fs::read_to_string(path).await?;
    let mut ops: Value = serde_json::from_str(&content).map_err(|e| SessionError::Learn {
        message: format!("Unable to parse {}: {e}", path.display()),
    })?;

    match ops.get_mut("info").map(Value::take) {
        Some(info) if !info.is_null() => Ok(info),
        _ => Err(SessionError::Learn {
            message: format!("Genie did not learn any '{feature}' state from {device}"),
        }),
    }
}

/// Decide whether a failed learn never reached the device.
fn classify_failure(transcript: &str, status: ExitStatus) -> SessionError {
    let message = match transcript.trim() {
        "" => format!("genie learn exited with {status} without producing any output"),
        text => text.to_string(),
    };

    if CONNECTION_FAILURE_MARKERS
        .iter()
        .any(|marker| transcript.contains(marker))
    {
        SessionError::Connection { message }
    } else {
        SessionError::Learn { message }
    }
}
