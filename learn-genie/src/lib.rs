//! # learn-genie
//!
//! Automation module that learns the operational state of one network
//! device feature with pyATS/Genie and diffs it against an earlier
//! snapshot.
//!
//! ## Features
//!
//! - Parameter validation with actionable messages
//! - Feature/OS lookup in Genie's capability manifest before any device is contacted
//! - Per-feature default exclusions for volatile fields (timers, counters)
//! - Unified diff of snapshots, optionally colorized (`color` cargo feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use learn_genie::{EngineConfig, LearnModule};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let module = LearnModule::from_config(EngineConfig::from_env());
//!
//!     let result = module
//!         .run(&json!({
//!             "host": "10.1.1.1",
//!             "username": "admin",
//!             "password": "secret",
//!             "os": "iosxe",
//!             "feature": "bgp",
//!         }))
//!         .await;
//!
//!     println!("{}", result.to_json().unwrap());
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod device;
pub mod diff;
pub mod error;
pub mod features;
pub mod module;
pub mod params;
pub mod report;

// Re-export main types for convenience
pub use catalog::CapabilityCatalog;
pub use config::EngineConfig;
pub use device::{DeviceDescriptor, DeviceSession, GenieCli, LearnEngine};
pub use diff::{DiffOutcome, Differ, ExclusionMatcher, JsonDiffer};
pub use error::{Error, Result};
pub use features::{FeatureDefinition, FeatureRegistry};
pub use module::{LearnModule, module_args};
pub use params::{ModuleParams, OsTag};
pub use report::ModuleResult;
