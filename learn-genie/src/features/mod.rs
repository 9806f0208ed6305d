//! Feature definitions and default diff exclusions.
//!
//! Each Genie feature declares the fields that change on every poll
//! (counters, timers, uptimes) and should be ignored when two snapshots
//! are compared. Those declarations live in a typed registry instead of
//! being discovered at runtime; a feature with no definition simply has
//! no default exclusions.

mod builtin;
mod definition;
mod exclusion;
mod registry;

pub use definition::{Declaration, DeclaredExclusions, FeatureDefinition};
pub use exclusion::{DefaultExclusions, ExclusionSet, resolve_exclusions};
pub use registry::FeatureRegistry;
