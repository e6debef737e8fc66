//! Stop handle for a running effect.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

struct StopState {
    // Held while the effect writes to its sink, so a write and a stop never
    // interleave.
    stopped: Mutex<bool>,
    notify: watch::Sender<bool>,
}

/// Handle that stops a [`crate::TypingEffect`].
///
/// Cloning is cheap; every clone stops the same effect.
#[derive(Clone)]
pub struct StopHandle {
    state: Arc<StopState>,
}

impl StopHandle {
    pub(crate) fn new() -> (Self, StopSignal) {
        let (notify, receiver) = watch::channel(false);
        let state = Arc::new(StopState {
            stopped: Mutex::new(false),
            notify,
        });
        let signal = StopSignal {
            state: state.clone(),
            receiver,
        };
        (Self { state }, signal)
    }

    /// Request a stop.
    ///
    /// When this returns, any write in progress has finished and no later
    /// write will happen. Calling it again is a no-op.
    pub fn stop(&self) {
        let mut stopped = self
            .state
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return;
        }
        *stopped = true;
        drop(stopped);
        self.state.notify.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self
            .state
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopHandle")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// The effect task's side of a [`StopHandle`].
pub(crate) struct StopSignal {
    state: Arc<StopState>,
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    /// Run `write` unless stopped; the stop lock is held for the duration.
    pub(crate) fn write_unless_stopped<T>(&self, write: impl FnOnce() -> T) -> Option<T> {
        let stopped = self
            .state
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return None;
        }
        let out = write();
        drop(stopped);
        Some(out)
    }

    pub(crate) fn is_stopped(&self) -> bool {
        *self
            .state
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Stop from inside the effect, e.g. after the sink goes away.
    pub(crate) fn stop(&self) {
        StopHandle {
            state: self.state.clone(),
        }
        .stop();
    }

    /// Resolve once a stop has been requested.
    pub(crate) async fn stopped(&mut self) {
        // The sender lives in `state`, which we hold, so this cannot error.
        let _ = self.receiver.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_blocks_later_writes() {
        let (handle, signal) = StopHandle::new();
        assert_eq!(signal.write_unless_stopped(|| 1), Some(1));
        handle.stop();
        assert!(handle.is_stopped());
        assert!(signal.is_stopped());
        assert_eq!(signal.write_unless_stopped(|| 2), None);
    }

    #[test]
    fn clones_share_state_and_stop_is_idempotent() {
        let (handle, signal) = StopHandle::new();
        let other = handle.clone();
        other.stop();
        other.stop();
        assert!(handle.is_stopped());
        assert!(signal.is_stopped());
    }

    #[tokio::test]
    async fn stopped_resolves_after_stop_even_if_requested_earlier() {
        let (handle, mut signal) = StopHandle::new();
        handle.stop();
        signal.stopped().await;
    }
}
