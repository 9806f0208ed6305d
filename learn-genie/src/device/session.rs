//! Learning engine traits and the scoped learn operation.

use std::future::Future;

use log::{debug, warn};
use serde_json::Value;

use super::descriptor::DeviceDescriptor;
use crate::error::SessionError;

/// An external engine able to open sessions to devices.
pub trait LearnEngine: Send + Sync {
    /// Session type handed out by [`LearnEngine::connect`].
    type Session: DeviceSession;

    /// Load the device into the engine and open a session to it.
    fn connect(
        &self,
        device: &DeviceDescriptor,
    ) -> impl Future<Output = Result<Self::Session, SessionError>> + Send;
}

/// An open session to one device.
///
/// Implementations must release their resources when dropped, even if
/// [`DeviceSession::disconnect`] was never called.
pub trait DeviceSession: Send {
    /// Learn a feature and return its OS-agnostic structure.
    fn learn(&mut self, feature: &str) -> impl Future<Output = Result<Value, SessionError>> + Send;

    /// Close the session.
    ///
    /// Consumes the session; it cannot be used after this.
    fn disconnect(self) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Connect, learn one feature, and disconnect.
///
/// The session is disconnected whether or not the learn succeeds. A
/// failure to disconnect after a successful learn is logged, not returned;
/// a learn failure always wins over a disconnect failure.
pub async fn learn_feature<E: LearnEngine>(
    engine: &E,
    device: &DeviceDescriptor,
    feature: &str,
) -> Result<Value, SessionError> {
    debug!("connecting to {} ({})", device.address(), device.os);
    let mut session = engine.connect(device).await?;

    debug!("learning feature '{feature}' from {}", device.host);
    let learned = session.learn(feature).await;

    if let Err(e) = session.disconnect().await {
        warn!("Failed to disconnect from {}: {}", device.host, e);
    }

    learned
}
