//! Argument spec and validation.

use secrecy::SecretString;
use serde_json::{Map, Value};

use super::{ConnectionKind, ModuleParams, OsTag, Protocol};
use crate::error::ValidationError;

/// Keys with this prefix are engine bookkeeping, not module parameters.
const INTERNAL_PREFIX: &str = "_ansible_";

/// Engine key that requests a dry run.
const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Expected shape of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Str,
    /// Integer in the inclusive range 0-65535.
    Port,
    Bool,
    StrList,
    Dict,
}

impl ArgKind {
    /// Check a (non-null) value against this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            // as_u64 is None for negatives and floats
            Self::Port => value.as_u64().is_some_and(|port| port <= u64::from(u16::MAX)),
            Self::Bool => value.is_boolean(),
            Self::StrList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::Dict => value.is_object(),
        }
    }

    /// Human description used in validation messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Str => "a string",
            Self::Port => "an integer between 0-65535",
            Self::Bool => "a boolean",
            Self::StrList => "a list of strings",
            Self::Dict => "a dictionary",
        }
    }
}

/// One entry of the argument spec.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

const fn arg(name: &'static str, kind: ArgKind, required: bool) -> ArgSpec {
    ArgSpec {
        name,
        kind,
        required,
    }
}

/// Parameters accepted by the module.
pub const ARGUMENT_SPEC: &[ArgSpec] = &[
    arg("host", ArgKind::Str, true),
    arg("port", ArgKind::Port, false),
    arg("username", ArgKind::Str, true),
    arg("password", ArgKind::Str, true),
    arg("os", ArgKind::Str, true),
    arg("feature", ArgKind::Str, true),
    arg("protocol", ArgKind::Str, false),
    arg("connection", ArgKind::Str, false),
    arg("compare_to", ArgKind::Dict, false),
    arg("exclude", ArgKind::StrList, false),
    arg("no_default_exclusion", ArgKind::Bool, false),
    arg("colors", ArgKind::Bool, false),
];

pub(super) fn validate(args: &Value) -> Result<ModuleParams, ValidationError> {
    let map = args
        .as_object()
        .ok_or_else(|| ValidationError::MalformedArguments {
            message: format!("got {}", json_kind(args)),
        })?;

    reject_unknown(map)?;

    for spec in ARGUMENT_SPEC {
        match present(map, spec.name) {
            None if spec.required => {
                return Err(ValidationError::Missing {
                    name: spec.name.to_string(),
                });
            }
            Some(value) if !spec.kind.accepts(value) => {
                return Err(ValidationError::WrongType {
                    name: spec.name.to_string(),
                    expected: spec.kind.expected().to_string(),
                });
            }
            _ => {}
        }
    }

    // Shapes are checked above; the accessors below only pick values out.
    let text = |name: &str| present(map, name).and_then(Value::as_str);
    let required = |name: &str| text(name).unwrap_or_default().to_string();
    let flag = |name: &str, default: bool| {
        present(map, name)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    };

    let os = required("os").parse::<OsTag>()?;
    let protocol = text("protocol")
        .map(str::parse::<Protocol>)
        .transpose()?
        .unwrap_or_default();
    let connection = text("connection")
        .map(str::parse::<ConnectionKind>)
        .transpose()?
        .unwrap_or_default();

    let port = present(map, "port")
        .and_then(Value::as_u64)
        .and_then(|port| u16::try_from(port).ok())
        .unwrap_or(22);

    let exclude = present(map, "exclude")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|items| !items.is_empty());

    Ok(ModuleParams {
        host: required("host"),
        port,
        username: required("username"),
        password: SecretString::from(required("password")),
        os,
        feature: required("feature"),
        protocol,
        connection,
        compare_to: present(map, "compare_to").cloned(),
        exclude,
        no_default_exclusion: flag("no_default_exclusion", false),
        colors: flag("colors", true),
        check_mode: map
            .get(CHECK_MODE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// A parameter counts as present unless it is missing or `null`.
fn present<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name).filter(|value| !value.is_null())
}

fn reject_unknown(map: &Map<String, Value>) -> Result<(), ValidationError> {
    let mut unknown: Vec<String> = map
        .keys()
        .filter(|key| !key.starts_with(INTERNAL_PREFIX))
        .filter(|key| !ARGUMENT_SPEC.iter().any(|spec| spec.name == key.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort();
    let mut supported: Vec<String> = ARGUMENT_SPEC
        .iter()
        .map(|spec| spec.name.to_string())
        .collect();
    supported.sort();

    Err(ValidationError::Unsupported {
        names: unknown,
        supported,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn base_args() -> Value {
        json!({
            "host": "10.1.1.1",
            "username": "admin",
            "password": "secret",
            "os": "iosxe",
            "feature": "bgp",
        })
    }

    fn with(key: &str, value: Value) -> Value {
        let mut args = base_args();
        args[key] = value;
        args
    }

    #[test]
    fn test_minimal_arguments_use_defaults() {
        let params = validate(&base_args()).unwrap();
        assert_eq!(params.host, "10.1.1.1");
        assert_eq!(params.port, 22);
        assert_eq!(params.username, "admin");
        assert_eq!(params.password.expose_secret(), "secret");
        assert_eq!(params.os, OsTag::Iosxe);
        assert_eq!(params.protocol, Protocol::Ssh);
        assert_eq!(params.connection, ConnectionKind::Unicon);
        assert!(params.compare_to.is_none());
        assert!(params.exclude.is_none());
        assert!(!params.no_default_exclusion);
        assert!(params.colors);
        assert!(!params.check_mode);
    }

    #[test]
    fn test_missing_required_argument() {
        for name in ["host", "username", "password", "os", "feature"] {
            let mut args = base_args();
            args.as_object_mut().unwrap().remove(name);
            assert_eq!(
                validate(&args).unwrap_err(),
                ValidationError::Missing {
                    name: name.to_string()
                }
            );
        }
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = validate(&with("host", Value::Null)).unwrap_err();
        assert!(matches!(err, ValidationError::Missing { name } if name == "host"));
    }

    #[test]
    fn test_port_inside_range_is_accepted() {
        for port in [0u64, 1, 22, 830, 65534, 65535] {
            let params = validate(&with("port", json!(port))).unwrap();
            assert_eq!(u64::from(params.port), port);
        }
    }

    #[test]
    fn test_port_outside_range_or_not_integer_is_rejected() {
        for port in [
            json!(-1),
            json!(65536),
            json!(100000),
            json!(22.5),
            json!("22"),
            json!(true),
            json!([22]),
        ] {
            let err = validate(&with("port", port.clone())).unwrap_err();
            assert!(
                matches!(&err, ValidationError::WrongType { name, .. } if name == "port"),
                "port {port} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_text_fields_must_be_strings() {
        let err = validate(&with("host", json!(10))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                name: "host".to_string(),
                expected: "a string".to_string()
            }
        );
    }

    #[test]
    fn test_os_must_be_supported() {
        let err = validate(&with("os", json!("junos"))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidChoice { name, .. } if name == "os"));
    }

    #[test]
    fn test_flags_must_be_booleans() {
        let err = validate(&with("colors", json!("yes"))).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { name, .. } if name == "colors"));

        let params = validate(&with("no_default_exclusion", json!(true))).unwrap();
        assert!(params.no_default_exclusion);
    }

    #[test]
    fn test_exclude_must_be_list_of_strings() {
        let err = validate(&with("exclude", json!(["a", 1]))).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { name, .. } if name == "exclude"));

        let params = validate(&with("exclude", json!(["a", "b"]))).unwrap();
        assert_eq!(params.exclude, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_empty_exclude_is_not_supplied() {
        let params = validate(&with("exclude", json!([]))).unwrap();
        assert!(params.exclude.is_none());
    }

    #[test]
    fn test_compare_to_must_be_dict() {
        let err = validate(&with("compare_to", json!("previous"))).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { name, .. } if name == "compare_to"));
    }

    #[test]
    fn test_unknown_parameters_rejected() {
        let err = validate(&with("vrf", json!("mgmt"))).unwrap_err();
        match err {
            ValidationError::Unsupported { names, supported } => {
                assert_eq!(names, vec!["vrf".to_string()]);
                assert!(supported.contains(&"feature".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_engine_keys_are_ignored_and_check_mode_read() {
        let mut args = base_args();
        args["_ansible_check_mode"] = json!(true);
        args["_ansible_no_log"] = json!(false);
        let params = validate(&args).unwrap();
        assert!(params.check_mode);
    }

    #[test]
    fn test_arguments_must_be_object() {
        let err = validate(&json!(["host"])).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedArguments { .. }));
    }
}
