//! Device connection descriptor.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::params::{ConnectionKind, ModuleParams, OsTag, Protocol};

/// Credentials used to log into the device.
pub struct Credentials {
    /// Username for authentication.
    pub username: String,

    /// Password for authentication (redacted in `Debug`).
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: SecretString::from(self.password.expose_secret().to_string()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the learning engine needs to reach one device.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    /// Target host (hostname or IP address).
    pub host: String,

    /// CLI port (default: 22).
    pub port: u16,

    /// CLI transport.
    pub protocol: Protocol,

    pub credentials: Credentials,

    /// Device operating system.
    pub os: OsTag,

    /// Connection library the engine drives the CLI with.
    pub connection: ConnectionKind,
}

impl DeviceDescriptor {
    /// Create a descriptor with the default port and protocol.
    pub fn new(host: impl Into<String>, os: OsTag, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            port: 22,
            protocol: Protocol::Ssh,
            credentials,
            os,
            connection: ConnectionKind::Unicon,
        }
    }

    /// Set the CLI port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the CLI transport.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the connection library.
    pub fn connection(mut self, connection: ConnectionKind) -> Self {
        self.connection = connection;
        self
    }

    /// Build the descriptor from validated module parameters.
    pub fn from_params(params: &ModuleParams) -> Self {
        let credentials = Credentials {
            username: params.username.clone(),
            password: SecretString::from(params.password.expose_secret().to_string()),
        };
        Self::new(&params.host, params.os, credentials)
            .port(params.port)
            .protocol(params.protocol)
            .connection(params.connection)
    }

    /// `host:port` for log messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let credentials = Credentials::new("admin", "pw");
        let device = DeviceDescriptor::new("10.1.1.1", OsTag::Iosxe, credentials);
        assert_eq!(device.port, 22);
        assert_eq!(device.protocol, Protocol::Ssh);
        assert_eq!(device.address(), "10.1.1.1:22");
    }

    #[test]
    fn test_password_is_redacted() {
        let device = DeviceDescriptor::new(
            "10.1.1.1",
            OsTag::Nxos,
            Credentials::new("admin", "hunter2"),
        );
        let debug = format!("{device:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_params() {
        let params = ModuleParams::from_args(&json!({
            "host": "core1",
            "port": 2222,
            "protocol": "telnet",
            "username": "admin",
            "password": "pw",
            "os": "iosxr",
            "feature": "bgp",
        }))
        .unwrap();
        let device = DeviceDescriptor::from_params(&params);
        assert_eq!(device.host, "core1");
        assert_eq!(device.port, 2222);
        assert_eq!(device.protocol, Protocol::Telnet);
        assert_eq!(device.os, OsTag::Iosxr);
        assert_eq!(device.credentials.password.expose_secret(), "pw");
    }
}
