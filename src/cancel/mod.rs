//! Cancellation scope composition
//!
//! Every network call runs under a token derived from the caller's token and
//! a fixed timeout, whichever fires first. The scope owns the backing timer
//! task; dropping the scope releases it, so repeated calls against a
//! long-lived caller token accumulate nothing.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a derived token was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    /// The caller's token was cancelled.
    Caller,
    /// The per-call timer elapsed.
    Timeout,
}

/// A derived cancellation token bound to a timeout.
///
/// The token transitions to cancelled exactly once, caused by whichever of
/// {timer fires, caller token cancels} happens first. An already-cancelled
/// caller token yields a child that is cancelled synchronously; the timer is
/// still scheduled and still released on drop.
#[derive(Debug)]
pub struct CancelScope {
    token: CancellationToken,
    parent: Option<CancellationToken>,
    timer: JoinHandle<()>,
}

impl CancelScope {
    /// Derive a token from an optional caller token and a timeout.
    pub fn new(parent: Option<&CancellationToken>, timeout: Duration) -> Self {
        let token = match parent {
            Some(p) => p.child_token(),
            None => CancellationToken::new(),
        };

        let timer = {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                token.cancel();
            })
        };

        Self {
            token,
            parent: parent.cloned(),
            timer,
        }
    }

    /// The derived token to thread through the guarded call.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether the caller's own token has been cancelled.
    pub fn caller_cancelled(&self) -> bool {
        self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }

    /// What cancelled the derived token, if anything has.
    pub fn cause(&self) -> Option<CancelCause> {
        if !self.token.is_cancelled() {
            None
        } else if self.caller_cancelled() {
            Some(CancelCause::Caller)
        } else {
            Some(CancelCause::Timeout)
        }
    }
}

impl Drop for CancelScope {
    fn drop(&mut self) {
        // Release the timer. The parent link is freed with the last clone of
        // the derived token.
        self.timer.abort();
    }
}
