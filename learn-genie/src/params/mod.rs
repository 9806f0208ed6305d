//! Module parameters.
//!
//! The automation engine hands the module a JSON object of named
//! parameters. [`ModuleParams::from_args`] checks it against the
//! argument spec and produces typed values; nothing else in the crate
//! looks at the raw document.

mod argument_spec;

pub use argument_spec::{ARGUMENT_SPEC, ArgKind, ArgSpec};

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde_json::Value;

use crate::error::ValidationError;

/// Device operating systems the module accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsTag {
    Ios,
    Iosxe,
    Iosxr,
    Nxos,
}

impl OsTag {
    /// All accepted OS tags, in documentation order.
    pub const ALL: [OsTag; 4] = [OsTag::Ios, OsTag::Iosxe, OsTag::Iosxr, OsTag::Nxos];

    /// The tag as Genie spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Iosxe => "iosxe",
            Self::Iosxr => "iosxr",
            Self::Nxos => "nxos",
        }
    }
}

impl fmt::Display for OsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| invalid_choice("os", s, Self::ALL.iter().map(OsTag::as_str)))
    }
}

/// CLI transport used to reach the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Ssh,
    Telnet,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Ssh, Protocol::Telnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "ssh",
            Self::Telnet => "telnet",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| invalid_choice("protocol", s, Self::ALL.iter().map(Protocol::as_str)))
    }
}

/// Connection library Genie drives the device with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionKind {
    #[default]
    Unicon,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unicon => "unicon",
        }
    }
}

impl FromStr for ConnectionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unicon" => Ok(Self::Unicon),
            other => Err(invalid_choice("connection", other, ["unicon"])),
        }
    }
}

fn invalid_choice<'a>(
    name: &str,
    value: &str,
    choices: impl IntoIterator<Item = &'a str>,
) -> ValidationError {
    ValidationError::InvalidChoice {
        name: name.to_string(),
        value: value.to_string(),
        choices: choices.into_iter().map(str::to_string).collect(),
    }
}

/// Validated module parameters.
#[derive(Debug)]
pub struct ModuleParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub os: OsTag,
    pub feature: String,
    pub protocol: Protocol,
    pub connection: ConnectionKind,

    /// Prior module result to diff against.
    pub compare_to: Option<Value>,

    /// User exclusions (`None` when not supplied or empty).
    pub exclude: Option<Vec<String>>,

    pub no_default_exclusion: bool,
    pub colors: bool,

    /// Validate only, never touch the device.
    pub check_mode: bool,
}

impl ModuleParams {
    /// Validate an argument document and produce typed parameters.
    pub fn from_args(args: &Value) -> Result<Self, ValidationError> {
        argument_spec::validate(args)
    }

    /// Whether the invocation compares against a baseline.
    pub fn diff_requested(&self) -> bool {
        self.compare_to.is_some()
    }

    /// The baseline snapshot for this invocation's feature.
    ///
    /// `compare_to` is normally the registered result of an earlier run, so
    /// the snapshot is looked up under `genie.<feature>` first and then
    /// directly under `<feature>`.
    pub fn baseline(&self) -> Result<Option<&Value>, ValidationError> {
        let Some(compare_to) = &self.compare_to else {
            return Ok(None);
        };

        compare_to
            .get("genie")
            .and_then(|genie| genie.get(&self.feature))
            .or_else(|| compare_to.get(&self.feature))
            .map(Some)
            .ok_or_else(|| ValidationError::WrongType {
                name: "compare_to".to_string(),
                expected: format!(
                    "a previous result containing genie.{} or {}",
                    self.feature, self.feature
                ),
            })
    }
}
