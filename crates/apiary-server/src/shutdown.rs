//! Graceful shutdown coordination.
//!
//! A [`ShutdownSignal`] is shared between the accept loop, every connection
//! task, and any service method that wants to stop the process. Methods
//! call [`ShutdownSignal::trigger_after`] so that their own response is
//! flushed before the listener goes away.
//!
//! ```rust,ignore
//! use apiary_server::ShutdownSignal;
//! use std::time::Duration;
//!
//! let shutdown = ShutdownSignal::with_os_signals();
//! shutdown.trigger_after(Duration::from_secs(1));
//! shutdown.recv().await;
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Notify};

/// A cloneable, trigger-once shutdown flag that can also be awaited.
///
/// # Example
///
/// ```rust
/// use apiary_server::ShutdownSignal;
///
/// let shutdown = ShutdownSignal::new();
/// let observer = shutdown.clone();
///
/// shutdown.trigger();
/// shutdown.trigger();
/// assert!(observer.is_shutdown());
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
    sender: broadcast::Sender<()>,
}

impl ShutdownSignal {
    /// Creates an untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            triggered: Arc::new(AtomicBool::new(false)),
            sender,
        }
    }

    /// Triggers shutdown. Idempotent.
    pub fn trigger(&self) {
        if self
            .triggered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::info!("shutdown triggered");
            // No receivers is fine.
            let _ = self.sender.send(());
        }
    }

    /// Triggers shutdown from a background task after `delay`.
    ///
    /// Returns immediately. Inside a tokio runtime the delay runs on a
    /// spawned task; otherwise a plain thread sleeps and triggers.
    pub fn trigger_after(&self, delay: Duration) {
        let signal = self.clone();
        tracing::info!(delay_ms = delay.as_millis() as u64, "shutdown scheduled");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    signal.trigger();
                });
            }
            Err(_) => {
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    signal.trigger();
                });
            }
        }
    }

    /// Returns `true` once shutdown has been triggered.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Returns a future that resolves when shutdown is triggered.
    ///
    /// Resolves immediately if it already was. The future owns its
    /// subscription, so it can be moved into a spawned task.
    pub fn recv(&self) -> impl Future<Output = ()> + Send + 'static {
        let triggered = Arc::clone(&self.triggered);
        let mut receiver = self.sender.subscribe();
        async move {
            // The flag is set before the broadcast, so checking it after
            // subscribing cannot miss a trigger.
            if triggered.load(Ordering::SeqCst) {
                return;
            }
            let _ = receiver.recv().await;
        }
    }

    /// Creates a signal that also fires on SIGINT or SIGTERM.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn with_os_signals() -> Self {
        let signal = Self::new();
        signal.listen_for_os_signals();
        signal
    }

    /// Makes an existing signal also fire on SIGINT or SIGTERM.
    ///
    /// Must be called from within a tokio runtime.
    pub fn listen_for_os_signals(&self) {
        let on_signal = self.clone();
        tokio::spawn(async move {
            if wait_for_os_signal().await {
                on_signal.trigger();
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for SIGINT or SIGTERM. Returns `false` if handlers could not be
/// installed, in which case the signal is never triggered from the OS.
#[cfg(unix)]
async fn wait_for_os_signal() -> bool {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "failed to install signal handlers");
                return false;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("received SIGTERM"),
        _ = sigint.recv() => tracing::info!("received SIGINT"),
    }
    true
}

#[cfg(not(unix))]
async fn wait_for_os_signal() -> bool {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("received Ctrl+C");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            false
        }
    }
}

/// Counts live connections so shutdown can wait for them to drain.
///
/// ```rust
/// use apiary_server::ConnectionTracker;
///
/// let tracker = ConnectionTracker::new();
/// let token = tracker.acquire();
/// assert_eq!(tracker.active_connections(), 1);
/// drop(token);
/// assert_eq!(tracker.active_connections(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    active: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl ConnectionTracker {
    /// Creates a tracker with no connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection until the returned token is dropped.
    #[must_use]
    pub fn acquire(&self) -> ConnectionToken {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionToken {
            active: Arc::clone(&self.active),
            notify: Arc::clone(&self.notify),
        }
    }

    /// Returns the number of live connections.
    #[must_use]
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Resolves once no connection is live.
    pub async fn wait_for_drain(&self) {
        loop {
            let notified = self.notify.notified();
            if self.active.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Held by a connection task for as long as the connection lives.
#[derive(Debug)]
pub struct ConnectionToken {
    active: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl Drop for ConnectionToken {
    fn drop(&mut self) {
        if self.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }
}
