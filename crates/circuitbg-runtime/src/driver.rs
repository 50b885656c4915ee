//! Async driver: feeds resize notifications into a [`Background`] and fires
//! its redraws on the tokio clock.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use circuitbg_core::Viewport;

use crate::host::{HostAttachment, SurfaceProvider, ViewportOracle};
use crate::orchestrator::Background;

/// Sends viewport changes to a running driver. Dropping every notifier stops
/// the driver.
#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    tx: mpsc::UnboundedSender<Viewport>,
}

impl ResizeNotifier {
    /// Returns `false` once the driver has stopped.
    pub fn notify(&self, viewport: Viewport) -> bool {
        self.tx.send(viewport).is_ok()
    }
}

pub fn channel() -> (ResizeNotifier, mpsc::UnboundedReceiver<Viewport>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResizeNotifier { tx }, rx)
}

/// Initialize `background`, then redraw on settled resizes until the channel
/// closes. The background is shut down and handed back.
pub async fn run<P, H>(
    mut background: Background<P, H>,
    oracle: impl ViewportOracle,
    mut notifications: mpsc::UnboundedReceiver<Viewport>,
) -> Background<P, H>
where
    P: SurfaceProvider,
    H: HostAttachment,
{
    background.initialize(&oracle);

    loop {
        let deadline = background.deadline().map(Instant::from_std);
        tokio::select! {
            msg = notifications.recv() => match msg {
                Some(viewport) => background.notify(viewport, Instant::now().into_std()),
                None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                background.poll(Instant::now().into_std());
            }
        }
    }

    log::debug!("resize channel closed, stopping background");
    background.shutdown();
    background
}

/// Spawn [`run`] on the current tokio runtime.
pub fn spawn<P, H>(
    background: Background<P, H>,
    oracle: impl ViewportOracle + Send + 'static,
) -> (ResizeNotifier, JoinHandle<Background<P, H>>)
where
    P: SurfaceProvider + Send + 'static,
    H: HostAttachment + Send + 'static,
{
    let (notifier, rx) = channel();
    let handle = tokio::spawn(run(background, oracle, rx));
    (notifier, handle)
}
