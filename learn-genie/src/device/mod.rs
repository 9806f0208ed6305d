//! Device session layer.
//!
//! A [`DeviceDescriptor`] says how to reach one device. A [`LearnEngine`]
//! turns it into a [`DeviceSession`] that can learn features;
//! [`learn_feature`] runs the connect, learn and disconnect sequence.

mod descriptor;
mod genie;
mod session;
mod testbed;

pub use descriptor::{Credentials, DeviceDescriptor};
pub use genie::{CONNECTION_FAILURE_MARKERS, GenieCli, GenieSession};
pub use session::{DeviceSession, LearnEngine, learn_feature};
pub use testbed::Testbed;
