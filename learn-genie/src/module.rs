//! The learn pipeline.
//!
//! [`LearnModule`] runs one invocation: validate parameters, look the
//! feature up in the capability catalog, resolve exclusions, learn the
//! feature from the device and diff it against the baseline.

use log::{debug, info};
use serde_json::Value;

use crate::catalog::{CapabilityCatalog, locate_manifest};
use crate::config::EngineConfig;
use crate::device::{DeviceDescriptor, GenieCli, LearnEngine, learn_feature};
use crate::diff::{Differ, ExclusionMatcher, JsonDiffer, select_renderer};
use crate::error::Result;
use crate::features::{DefaultExclusions, FeatureRegistry, resolve_exclusions};
use crate::params::ModuleParams;
use crate::report::ModuleResult;

/// Key some engines wrap module arguments in.
pub const MODULE_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// One configured module, ready to run invocations.
pub struct LearnModule<E, D = JsonDiffer> {
    config: EngineConfig,
    engine: E,
    differ: D,
    registry: FeatureRegistry,
}

impl LearnModule<GenieCli> {
    /// Module backed by the `genie` command line.
    pub fn from_config(config: EngineConfig) -> Self {
        let engine = GenieCli::new(config.clone());
        Self::new(config, engine)
    }
}

impl<E: LearnEngine> LearnModule<E> {
    /// Module using `engine`, the JSON differ and the built-in feature registry.
    pub fn new(config: EngineConfig, engine: E) -> Self {
        Self {
            config,
            engine,
            differ: JsonDiffer::default(),
            registry: FeatureRegistry::builtin(),
        }
    }
}

impl<E: LearnEngine, D: Differ> LearnModule<E, D> {
    /// Replace the snapshot differ.
    pub fn with_differ<D2: Differ>(self, differ: D2) -> LearnModule<E, D2> {
        LearnModule {
            config: self.config,
            engine: self.engine,
            differ,
            registry: self.registry,
        }
    }

    /// Replace the feature registry default exclusions come from.
    pub fn with_registry(mut self, registry: FeatureRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run one invocation and always produce a result document.
    pub async fn run(&self, args: &Value) -> ModuleResult {
        match self.execute(args).await {
            Ok(result) => result,
            Err(e) => {
                debug!("invocation failed: {e:?}");
                ModuleResult::from(e)
            }
        }
    }

    /// Run one invocation, returning the first error encountered.
    pub async fn execute(&self, args: &Value) -> Result<ModuleResult> {
        let params = ModuleParams::from_args(args)?;
        let baseline = params.baseline()?;

        if params.check_mode {
            info!("check mode: not contacting {}", params.host);
            return Ok(ModuleResult::check_mode());
        }

        let manifest = locate_manifest(&self.config).await?;
        let catalog = CapabilityCatalog::load(manifest).await?;
        catalog.check(&params.feature, params.os)?;

        // Patterns are compiled up front so a bad one never reaches the device.
        let exclusions = if params.diff_requested() {
            let defaults = DefaultExclusions::collect(&catalog, &self.registry);
            let resolved = resolve_exclusions(
                params.exclude.as_deref(),
                &defaults.for_feature(&params.feature),
                params.no_default_exclusion,
            );
            Some(ExclusionMatcher::new(&resolved)?)
        } else {
            None
        };

        let device = DeviceDescriptor::from_params(&params);
        let snapshot = learn_feature(&self.engine, &device, &params.feature).await?;
        info!("learned '{}' from {}", params.feature, params.host);

        let diff = match (baseline, exclusions) {
            (Some(baseline), Some(exclusions)) => {
                debug!("diffing with {} exclusions", exclusions.len());
                let outcome = self.differ.diff(baseline, &snapshot, &exclusions)?;
                let renderer = select_renderer(params.colors);
                let lines: Vec<_> = outcome.render(renderer.as_ref()).collect();
                Some(lines.join("\n"))
            }
            _ => None,
        };

        Ok(ModuleResult::learned(params.feature.clone(), snapshot, diff))
    }
}

/// Module arguments from an argument file document.
///
/// Accepts both the bare parameter object and one wrapped under
/// [`MODULE_ARGS_KEY`].
pub fn module_args(document: Value) -> Value {
    match document {
        Value::Object(mut map) if map.contains_key(MODULE_ARGS_KEY) => {
            map.remove(MODULE_ARGS_KEY).unwrap_or_default()
        }
        other => other,
    }
}
