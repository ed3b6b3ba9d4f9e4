use crate::sink::CommandSink;
use helm_ctrl::{encode, SharedAxisState};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Owner's view of the publisher loop.
///
/// Start/stop toggle the streaming flag and are idempotent; `shutdown`
/// signals the loop and joins it, so the sink (and its socket) is only torn
/// down after the last tick has finished.
pub struct StreamerHandle {
    streaming: Arc<AtomicBool>,
    emitted: Arc<AtomicU64>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl StreamerHandle {
    pub fn start_streaming(&self) {
        if !self.streaming.swap(true, Ordering::SeqCst) {
            info!("streaming started");
        }
    }

    pub fn stop_streaming(&self) {
        if self.streaming.swap(false, Ordering::SeqCst) {
            info!("streaming stopped");
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::SeqCst)
    }

    /// Commands successfully handed to the sink so far.
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::SeqCst)
    }

    /// Cooperative stop: the loop observes the signal between ticks and
    /// exits within one tick period. Consumes the handle; nothing is sent
    /// after this returns.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("publisher task join failed: {}", e);
        }
    }
}

/// Spawn the fixed-rate publisher loop. It snapshots the shared axis state,
/// encodes, and publishes on every tick while streaming is enabled; the tick
/// wait happens whether or not anything was emitted.
pub fn spawn<S: CommandSink>(axes: SharedAxisState, sink: S, period: Duration) -> StreamerHandle {
    let streaming = Arc::new(AtomicBool::new(false));
    let emitted = Arc::new(AtomicU64::new(0));
    let (stop_tx, stop_rx) = watch::channel(false);

    let task = tokio::spawn(run_loop(
        axes,
        sink,
        period,
        streaming.clone(),
        emitted.clone(),
        stop_rx,
    ));

    StreamerHandle { streaming, emitted, stop_tx, task }
}

async fn run_loop<S: CommandSink>(
    axes: SharedAxisState,
    mut sink: S,
    period: Duration,
    streaming: Arc<AtomicBool>,
    emitted: Arc<AtomicU64>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    // Fixed-rate cadence: late ticks delay, they do not burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !streaming.load(Ordering::SeqCst) {
                    continue;
                }
                // Snapshot under the lock, publish outside it.
                let snap = axes.lock().unwrap().snapshot();
                let cmd = encode(&snap);
                match sink.publish(&cmd).await {
                    Ok(()) => { emitted.fetch_add(1, Ordering::SeqCst); }
                    // A single missed emission must not halt the link.
                    Err(e) => warn!("setpoint publish failed, skipping tick: {:#}", e),
                }
            }
            res = stop_rx.changed() => {
                if res.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
        }
    }
    debug!("publisher loop exited");
}
