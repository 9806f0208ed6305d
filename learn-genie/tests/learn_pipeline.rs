//! End-to-end runs of the learn pipeline against a scripted engine.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use learn_genie::diff::ExclusionMatcher;
use learn_genie::error::{DiffError, SessionError};
use learn_genie::{
    DeviceDescriptor, DeviceSession, DiffOutcome, Differ, EngineConfig, FeatureDefinition,
    FeatureRegistry, LearnEngine, LearnModule,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct Counters {
    connects: AtomicUsize,
    learns: AtomicUsize,
    disconnects: AtomicUsize,
}

#[derive(Debug, Clone)]
enum Script {
    Learns(Value),
    LearnFails(String),
    ConnectFails(String),
}

struct ScriptedEngine {
    script: Script,
    counters: Arc<Counters>,
}

struct ScriptedSession {
    script: Script,
    counters: Arc<Counters>,
}

impl LearnEngine for ScriptedEngine {
    type Session = ScriptedSession;

    async fn connect(&self, device: &DeviceDescriptor) -> Result<ScriptedSession, SessionError> {
        assert_eq!(device.host, "10.1.1.1");
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        if let Script::ConnectFails(message) = &self.script {
            return Err(SessionError::Connection {
                message: message.clone(),
            });
        }
        Ok(ScriptedSession {
            script: self.script.clone(),
            counters: self.counters.clone(),
        })
    }
}

impl DeviceSession for ScriptedSession {
    async fn learn(&mut self, _feature: &str) -> Result<Value, SessionError> {
        self.counters.learns.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Learns(snapshot) => Ok(snapshot.clone()),
            Script::LearnFails(message) | Script::ConnectFails(message) => {
                Err(SessionError::Learn {
                    message: message.clone(),
                })
            }
        }
    }

    async fn disconnect(self) -> Result<(), SessionError> {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Fixture {
    _dir: TempDir,
    manifest: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("ops.json");
        std::fs::write(
            &manifest,
            json!({
                "bgp": {"iosxe": {}, "iosxr": {}, "nxos": {}},
                "interface": {"ios": {}, "iosxe": {}},
                "acl": {"iosxe": {}}
            })
            .to_string(),
        )
        .unwrap();
        Self { _dir: dir, manifest }
    }

    fn module(&self, script: Script) -> LearnModule<ScriptedEngine> {
        let config = EngineConfig::default().ops_manifest(&self.manifest);
        LearnModule::new(
            config,
            ScriptedEngine {
                script,
                counters: Arc::new(Counters::default()),
            },
        )
    }
}

/// Reports how many exclusion patterns it was handed.
struct CountingDiffer;

impl Differ for CountingDiffer {
    fn diff(
        &self,
        _before: &Value,
        _after: &Value,
        exclusions: &ExclusionMatcher,
    ) -> Result<DiffOutcome, DiffError> {
        Ok(DiffOutcome::new(format!("{} exclusions\n", exclusions.len())))
    }
}

fn counters<D: Differ>(module: &LearnModule<ScriptedEngine, D>) -> &Counters {
    &module.engine().counters
}

fn args(extra: Value) -> Value {
    let mut args = json!({
        "host": "10.1.1.1",
        "username": "admin",
        "password": "secret",
        "os": "iosxe",
        "feature": "bgp",
    });
    if let (Some(args), Some(extra)) = (args.as_object_mut(), extra.as_object()) {
        args.extend(extra.clone());
    }
    args
}

fn to_value(result: &learn_genie::ModuleResult) -> Value {
    serde_json::from_str(&result.to_json().unwrap()).unwrap()
}

#[tokio::test]
async fn test_supported_feature_is_learned() {
    let fixture = Fixture::new();
    let snapshot = json!({"instance": {"default": {"bgp_id": 65000}}});
    let module = fixture.module(Script::Learns(snapshot.clone()));

    let result = module.run(&args(json!({}))).await;

    assert_eq!(
        to_value(&result),
        json!({"changed": false, "genie": {"bgp": snapshot}})
    );
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 1);
    assert_eq!(counters(&module).disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_feature_never_connects() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({})));

    let result = module.run(&args(json!({"feature": "made_up"}))).await;

    assert!(result.is_failed());
    let msg = to_value(&result)["msg"].as_str().unwrap().to_string();
    assert!(msg.contains("not supported on the current version of Genie"));
    assert!(msg.contains("acl, bgp, interface"));
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_os_is_rejected() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({})));

    let result = module.run(&args(json!({"os": "solaris"}))).await;

    assert!(result.is_failed());
    assert!(to_value(&result)["msg"].as_str().unwrap().contains("solaris"));
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unsupported_platform_never_connects() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({})));

    let result = module.run(&args(json!({"feature": "interface", "os": "nxos"}))).await;

    assert_eq!(
        to_value(&result),
        json!({
            "changed": false,
            "failed": true,
            "msg": "The feature 'interface' is not supported on os 'nxos'. Supported platforms: ios, iosxe"
        })
    );
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_changed_snapshot_reports_diff() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({"a": 2})));

    let result = module
        .run(&args(json!({
            "compare_to": {"changed": false, "genie": {"bgp": {"a": 1}}},
            "colors": false,
        })))
        .await;

    assert!(result.changed());
    assert_eq!(
        to_value(&result),
        json!({
            "changed": true,
            "genie": {"bgp": {"a": 2}},
            "diff": {
                "prepared": "--- compare_to\n+++ current\n@@ -1,3 +1,3 @@\n {\n-  \"a\": 1\n+  \"a\": 2\n }"
            }
        })
    );
}

#[tokio::test]
async fn test_excluded_field_is_unchanged() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({"a": 2})));

    let result = module
        .run(&args(json!({
            "compare_to": {"genie": {"bgp": {"a": 1}}},
            "exclude": ["a"],
        })))
        .await;

    assert!(!result.changed());
    assert_eq!(to_value(&result)["diff"], json!({"prepared": ""}));
}

#[tokio::test]
async fn test_default_exclusions_hide_volatile_fields() {
    let fixture = Fixture::new();
    let baseline = json!({"neighbor": {"10.0.0.2": {"up_time": "01:00:00", "state": "up"}}});
    let learned = json!({"neighbor": {"10.0.0.2": {"up_time": "02:00:00", "state": "up"}}});

    let module = fixture.module(Script::Learns(learned.clone()));
    let result = module
        .run(&args(json!({"compare_to": {"genie": {"bgp": baseline.clone()}}})))
        .await;
    assert!(!result.changed());

    let module = fixture.module(Script::Learns(learned));
    let result = module
        .run(&args(json!({
            "compare_to": {"genie": {"bgp": baseline}},
            "no_default_exclusion": true,
            "colors": false,
        })))
        .await;
    assert!(result.changed());
    let prepared = to_value(&result)["diff"]["prepared"].as_str().unwrap().to_string();
    assert!(prepared.contains("-      \"up_time\": \"01:00:00\""));
}

#[cfg(feature = "color")]
#[tokio::test]
async fn test_diff_is_colored_by_default() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({"a": 2})));

    let result = module
        .run(&args(json!({"compare_to": {"genie": {"bgp": {"a": 1}}}})))
        .await;

    let prepared = to_value(&result)["diff"]["prepared"].as_str().unwrap().to_string();
    assert!(prepared.contains("\x1b[31m-  \"a\": 1\x1b[0m"));
    assert!(prepared.contains("\x1b[32m+  \"a\": 2\x1b[0m"));
    assert!(prepared.contains("\n {\n"));
}

#[tokio::test]
async fn test_check_mode_does_nothing() {
    let module = LearnModule::new(
        EngineConfig::default().ops_manifest("/nonexistent/ops.json"),
        ScriptedEngine {
            script: Script::Learns(json!({})),
            counters: Arc::new(Counters::default()),
        },
    );

    let result = module.run(&args(json!({"_ansible_check_mode": true}))).await;

    assert_eq!(to_value(&result), json!({"changed": false}));
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_manifest_never_connects() {
    let module = LearnModule::new(
        EngineConfig::default().ops_manifest("/nonexistent/ops.json"),
        ScriptedEngine {
            script: Script::Learns(json!({})),
            counters: Arc::new(Counters::default()),
        },
    );

    let result = module.run(&args(json!({}))).await;

    assert!(result.is_failed());
    assert!(
        to_value(&result)["msg"]
            .as_str()
            .unwrap()
            .starts_with("Unable to read the Genie ops manifest /nonexistent/ops.json")
    );
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_learn_failure_still_disconnects() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::LearnFails(
        "Could not learn feature 'bgp' on device".to_string(),
    ));

    let result = module.run(&args(json!({}))).await;

    assert_eq!(
        to_value(&result),
        json!({"changed": false, "failed": true, "msg": "Could not learn feature 'bgp' on device"})
    );
    assert_eq!(counters(&module).learns.load(Ordering::SeqCst), 1);
    assert_eq!(counters(&module).disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connection_failure_message_is_passed_through() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::ConnectFails(
        "Failed while bringing device to \"any\" state".to_string(),
    ));

    let result = module.run(&args(json!({}))).await;

    assert_eq!(
        to_value(&result)["msg"],
        json!("Failed while bringing device to \"any\" state")
    );
    assert_eq!(counters(&module).learns.load(Ordering::SeqCst), 0);
    assert_eq!(counters(&module).disconnects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_exclusion_is_reported() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({"a": 2})));

    let result = module
        .run(&args(json!({
            "compare_to": {"genie": {"bgp": {"a": 1}}},
            "exclude": ["(unclosed"],
        })))
        .await;

    assert!(result.is_failed());
    let msg = to_value(&result)["msg"].as_str().unwrap().to_string();
    assert!(msg.starts_with("Invalid exclusion pattern '(unclosed'"), "{msg}");
    assert!(!msg.contains("^(?:"), "{msg}");
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unbalanced_exclusion_never_connects() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({"a": 2, "b": 2})));

    let result = module
        .run(&args(json!({
            "compare_to": {"genie": {"bgp": {"a": 1, "b": 1}}},
            "exclude": ["a)|(b"],
        })))
        .await;

    assert!(result.is_failed());
    let msg = to_value(&result)["msg"].as_str().unwrap().to_string();
    assert!(msg.starts_with("Invalid exclusion pattern 'a)|(b'"), "{msg}");
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_custom_differ_receives_resolved_exclusions() {
    let fixture = Fixture::new();
    let module = fixture
        .module(Script::Learns(json!({"a": 2})))
        .with_differ(CountingDiffer);

    let result = module
        .run(&args(json!({
            "compare_to": {"genie": {"bgp": {"a": 1}}},
            "exclude": ["a", "b"],
            "no_default_exclusion": true,
            "colors": false,
        })))
        .await;

    assert!(result.changed());
    assert_eq!(to_value(&result)["diff"], json!({"prepared": "2 exclusions"}));
    assert_eq!(counters(&module).disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_custom_registry_supplies_default_exclusions() {
    let fixture = Fixture::new();
    let mut registry = FeatureRegistry::new();
    registry.register(FeatureDefinition::new("bgp").with_exclusion("a"));
    let module = fixture
        .module(Script::Learns(json!({"a": 2, "b": 1})))
        .with_registry(registry);

    let result = module
        .run(&args(json!({"compare_to": {"genie": {"bgp": {"a": 1, "b": 1}}}})))
        .await;

    assert!(!result.changed());
    assert_eq!(to_value(&result)["diff"], json!({"prepared": ""}));
}

#[tokio::test]
async fn test_learn_without_baseline_has_no_diff() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({"a": 2})));

    let result = module.run(&args(json!({"exclude": ["(unclosed"]}))).await;

    assert!(!result.changed());
    assert_eq!(to_value(&result), json!({"changed": false, "genie": {"bgp": {"a": 2}}}));
}

#[tokio::test]
async fn test_unknown_parameter_is_rejected() {
    let fixture = Fixture::new();
    let module = fixture.module(Script::Learns(json!({})));

    let result = module.run(&args(json!({"verbose": true}))).await;

    assert!(result.is_failed());
    assert!(to_value(&result)["msg"].as_str().unwrap().contains("verbose"));
    assert_eq!(counters(&module).connects.load(Ordering::SeqCst), 0);
}
