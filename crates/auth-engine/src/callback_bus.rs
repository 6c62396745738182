//! Hand-off of OAuth redirect URIs to the flow that awaits them.

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Producer side. Cheap to clone; held by whatever receives deep links.
#[derive(Debug, Clone)]
pub struct AuthCallbackBus {
    sender: mpsc::Sender<String>,
}

/// Single consumer side, owned by an [`OAuthFlow`](crate::OAuthFlow).
#[derive(Debug)]
pub struct AuthCallbackReceiver {
    receiver: mpsc::Receiver<String>,
}

/// A bus holding at most one undelivered callback.
pub fn auth_callback_channel() -> (AuthCallbackBus, AuthCallbackReceiver) {
    let (sender, receiver) = mpsc::channel(1);
    (AuthCallbackBus { sender }, AuthCallbackReceiver { receiver })
}

impl AuthCallbackBus {
    /// Queue `callback_uri` without waiting. Returns false when it was dropped
    /// because a callback is already pending or the receiver is gone.
    pub fn emit(&self, callback_uri: impl Into<String>) -> bool {
        match self.sender.try_send(callback_uri.into()) {
            Ok(()) => {
                debug!("Queued OAuth callback");
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("OAuth callback dropped: one is already pending");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("OAuth callback dropped: no receiver");
                false
            }
        }
    }
}

impl AuthCallbackReceiver {
    /// Next callback, `None` once every bus handle is dropped.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}
