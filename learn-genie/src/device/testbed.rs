//! pyATS testbed document for a single device.
//!
//! Genie loads devices from a testbed file. JSON is a subset of YAML, so
//! the document is written as JSON and handed to `genie learn` as is.

use indexmap::IndexMap;
use secrecy::ExposeSecret;
use serde::Serialize;

use super::descriptor::DeviceDescriptor;
use crate::params::ConnectionKind;

#[derive(Debug, Serialize)]
pub struct Testbed<'a> {
    devices: IndexMap<&'a str, TestbedDevice<'a>>,
}

#[derive(Debug, Serialize)]
struct TestbedDevice<'a> {
    os: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    credentials: TestbedCredentials<'a>,
    connections: TestbedConnections<'a>,
}

#[derive(Debug, Serialize)]
struct TestbedCredentials<'a> {
    default: Login<'a>,
}

#[derive(Serialize)]
struct Login<'a> {
    username: &'a str,
    password: &'a str,
}

impl std::fmt::Debug for Login<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct TestbedConnections<'a> {
    cli: CliConnection<'a>,
}

#[derive(Debug, Serialize)]
struct CliConnection<'a> {
    protocol: &'static str,
    ip: &'a str,
    port: u16,
    class: &'static str,
}

impl<'a> Testbed<'a> {
    /// Testbed with one device named after its host.
    pub fn single(device: &'a DeviceDescriptor) -> Self {
        let entry = TestbedDevice {
            os: device.os.as_str(),
            kind: "router",
            credentials: TestbedCredentials {
                default: Login {
                    username: &device.credentials.username,
                    password: device.credentials.password.expose_secret(),
                },
            },
            connections: TestbedConnections {
                cli: CliConnection {
                    protocol: device.protocol.as_str(),
                    ip: &device.host,
                    port: device.port,
                    class: connection_class(device.connection),
                },
            },
        };

        let mut devices = IndexMap::with_capacity(1);
        devices.insert(device.host.as_str(), entry);
        Self { devices }
    }

    /// Serialize the testbed.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn connection_class(connection: ConnectionKind) -> &'static str {
    match connection {
        ConnectionKind::Unicon => "unicon.Unicon",
    }
}
