//! `learn_genie` module binary.
//!
//! The automation engine runs the binary with the path of a JSON
//! argument file and reads one JSON result document from stdout.
//!
//! # Usage
//!
//! ```bash
//! echo '{"host": "10.1.1.1", "username": "admin", "password": "secret",
//!        "os": "iosxe", "feature": "bgp"}' > args.json
//! RUST_LOG=debug learn_genie args.json
//! ```

use std::env;
use std::process::ExitCode;

use learn_genie::{EngineConfig, LearnModule, ModuleResult, module_args};
use serde_json::Value;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout carries the result document; diagnostics go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let result = match read_args().await {
        Ok(args) => {
            LearnModule::from_config(EngineConfig::from_env())
                .run(&args)
                .await
        }
        Err(msg) => ModuleResult::failed(msg),
    };

    match result.to_json() {
        Ok(document) => println!("{document}"),
        Err(e) => {
            log::error!("unable to serialize result: {e}");
            println!(r#"{{"changed": false, "failed": true, "msg": "unable to serialize module result"}}"#);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::from(result.exit_code())
}

async fn read_args() -> Result<Value, String> {
    let path = env::args()
        .nth(1)
        .ok_or_else(|| "No argument file provided".to_string())?;
    let source = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Unable to read argument file {path}: {e}"))?;
    let document = serde_json::from_str(&source)
        .map_err(|e| format!("Argument file {path} is not valid JSON: {e}"))?;
    Ok(module_args(document))
}
