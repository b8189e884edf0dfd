//! Cooperative Cancellation
//!
//! A [`Context`] is handed to every top-level operation (`Compute::handle_query`,
//! `Storage::{set, get, del}`, `Database::handle_query`). Operations look at it
//! once, on entry, and bail out with [`DbError::Cancelled`](crate::DbError)
//! if it has been cancelled. Once an operation has started it always runs to
//! completion.
//!
//! The flag travels over a `tokio::sync::watch` channel: the [`CancelHandle`]
//! owns the sender, each `Context` clone holds a receiver. Checking the flag
//! never blocks, and async callers can additionally wait on
//! [`Context::cancelled`].

use tokio::sync::watch;
use tracing::{error, info};

/// Read side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct Context {
    cancelled: watch::Receiver<bool>,
}

/// Write side of a cancellation signal.
///
/// Dropping the handle does not cancel its context.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl Context {
    /// A context that is never cancelled.
    pub fn background() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { cancelled: rx }
    }

    /// A fresh context together with the handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { cancelled: rx }, CancelHandle { tx })
    }

    /// Returns true once the owning handle has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves when the context is cancelled.
    ///
    /// Never resolves if the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl CancelHandle {
    /// Cancels the context and every clone of it.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Cancels once a shutdown signal has been delivered.
    ///
    /// If listening for the signal failed, the error is logged and the
    /// context stays live; input ending still stops the query loop.
    pub fn cancel_on_signal(&self, signal: std::io::Result<()>) {
        match signal {
            Ok(()) => {
                info!("Shutdown signal received, stopping...");
                self.cancel();
            }
            Err(e) => error!(error = %e, "failed to listen for Ctrl+C"),
        }
    }

    /// Returns true if [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_background_is_never_cancelled() {
        let ctx = Context::background();
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn test_cancel_reaches_clones() {
        let (ctx, handle) = Context::with_cancel();
        let clone = ctx.clone();
        assert!(!ctx.is_cancelled());

        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(ctx.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::with_cancel();
        drop(handle);
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn test_delivered_signal_cancels() {
        let (ctx, handle) = Context::with_cancel();
        handle.cancel_on_signal(Ok(()));
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_signal_listener_error_keeps_context_live() {
        let (ctx, handle) = Context::with_cancel();
        let err = std::io::Error::new(std::io::ErrorKind::Unsupported, "no signal driver");

        handle.cancel_on_signal(Err(err));
        assert!(!handle.is_cancelled());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_future_resolves() {
        let (ctx, handle) = Context::with_cancel();
        let waiter = tokio::spawn({
            let ctx = ctx.clone();
            async move { ctx.cancelled().await }
        });

        handle.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancellation was not observed")
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_future_pends_for_background() {
        let ctx = Context::background();
        let result = tokio::time::timeout(Duration::from_millis(20), ctx.cancelled()).await;
        assert!(result.is_err());
    }
}
