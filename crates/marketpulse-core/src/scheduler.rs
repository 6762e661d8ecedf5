//! Polling loop around [`Orchestrator::refresh`].
//!
//! [`start`] spawns one background task that refreshes immediately, then on
//! every tick of the configured interval. The returned [`RefreshHandle`]
//! owns the task: it pushes configuration changes, triggers manual
//! refreshes, and cancels the loop (explicitly or on drop).
//!
//! Cycles never overlap. A refresh that outlasts the interval delays the next
//! tick instead of stacking a second cycle on top of it. A configuration
//! change that alters the [`RefreshKey`](crate::RefreshKey) drops the
//! in-flight refresh, so results computed for stale parameters are never
//! delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{oneshot, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::{DashboardConfig, Orchestrator, RefreshResult, SchedulerError};

/// Starts the polling loop on the current tokio runtime.
///
/// `on_result` receives every completed [`RefreshResult`] in order. It runs
/// on the loop task, so it should hand the result off rather than block.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn start<F>(
    orchestrator: Arc<Orchestrator>,
    config: DashboardConfig,
    on_result: F,
) -> RefreshHandle
where
    F: FnMut(RefreshResult) + Send + 'static,
{
    let (config_tx, config_rx) = watch::channel(config);
    let (stop_tx, stop_rx) = oneshot::channel();
    let manual = Arc::new(Notify::new());
    let refreshing = Arc::new(AtomicBool::new(false));

    let refresh_loop = RefreshLoop {
        orchestrator,
        config_rx,
        stop_rx,
        manual: Arc::clone(&manual),
        refreshing: Arc::clone(&refreshing),
        on_result,
    };
    let task = tokio::spawn(refresh_loop.run());

    RefreshHandle {
        config_tx,
        manual,
        refreshing,
        stop_tx: Some(stop_tx),
        task: Some(task),
    }
}

/// Cancellable handle to a running refresh loop.
pub struct RefreshHandle {
    config_tx: watch::Sender<DashboardConfig>,
    manual: Arc<Notify>,
    refreshing: Arc<AtomicBool>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Replaces the configuration. A changed refresh key restarts the cycle
    /// with an immediate refresh; cosmetic changes are only stored.
    pub fn update_config(&self, config: DashboardConfig) -> Result<(), SchedulerError> {
        self.config_tx
            .send(config)
            .map_err(|_| SchedulerError::Stopped)
    }

    pub fn config(&self) -> DashboardConfig {
        self.config_tx.borrow().clone()
    }

    /// Requests an out-of-band refresh. The interval timer is not reset.
    pub fn refresh_now(&self) -> Result<(), SchedulerError> {
        if self.is_stopped() {
            return Err(SchedulerError::Stopped);
        }
        self.manual.notify_one();
        Ok(())
    }

    /// True while a refresh cycle is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the loop and waits for the task to exit. In-flight requests are
    /// dropped; `on_result` is not called again.
    pub async fn cancel(mut self) -> Result<(), SchedulerError> {
        if let Some(stop) = self.stop_tx.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(())
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_tx.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

enum Wake {
    Refresh,
    Restart,
    Idle,
    Stop,
}

struct RefreshLoop<F> {
    orchestrator: Arc<Orchestrator>,
    config_rx: watch::Receiver<DashboardConfig>,
    stop_rx: oneshot::Receiver<()>,
    manual: Arc<Notify>,
    refreshing: Arc<AtomicBool>,
    on_result: F,
}

impl<F> RefreshLoop<F>
where
    F: FnMut(RefreshResult) + Send + 'static,
{
    async fn run(mut self) {
        let mut config = self.config_rx.borrow_and_update().clone();
        info!(
            interval_secs = config.refresh_interval.as_secs(),
            offline = config.offline,
            "refresh loop started"
        );

        'restart: loop {
            let mut ticker = time::interval(config.refresh_interval.as_duration());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                let wake = tokio::select! {
                    _ = &mut self.stop_rx => Wake::Stop,
                    changed = self.config_rx.changed() => match changed {
                        Ok(()) => self.apply_config(&mut config),
                        Err(_) => Wake::Stop,
                    },
                    _ = ticker.tick() => Wake::Refresh,
                    _ = self.manual.notified() => Wake::Refresh,
                };

                match wake {
                    Wake::Stop => break 'restart,
                    Wake::Restart => continue 'restart,
                    Wake::Idle => continue,
                    Wake::Refresh => {}
                }

                match self.run_cycle(&mut config).await {
                    Wake::Stop => break 'restart,
                    Wake::Restart => continue 'restart,
                    Wake::Refresh | Wake::Idle => {}
                }
            }
        }

        self.refreshing.store(false, Ordering::SeqCst);
        info!("refresh loop stopped");
    }

    async fn run_cycle(&mut self, config: &mut DashboardConfig) -> Wake {
        let active = config.clone();
        let orchestrator = Arc::clone(&self.orchestrator);
        let refresh = orchestrator.refresh(&active);
        tokio::pin!(refresh);

        self.refreshing.store(true, Ordering::SeqCst);
        let outcome = loop {
            tokio::select! {
                result = &mut refresh => break Ok(result),
                _ = &mut self.stop_rx => break Err(Wake::Stop),
                changed = self.config_rx.changed() => match changed {
                    Ok(()) => {
                        if let Wake::Restart = self.apply_config(config) {
                            debug!("dropping in-flight refresh for superseded configuration");
                            break Err(Wake::Restart);
                        }
                    }
                    Err(_) => break Err(Wake::Stop),
                },
            }
        };
        self.refreshing.store(false, Ordering::SeqCst);

        match outcome {
            Ok(result) => {
                (self.on_result)(result);
                Wake::Idle
            }
            Err(wake) => wake,
        }
    }

    fn apply_config(&mut self, config: &mut DashboardConfig) -> Wake {
        let next = self.config_rx.borrow_and_update().clone();
        let restart = next.refresh_key() != config.refresh_key();
        *config = next;

        if restart {
            info!(
                stock = %config.stock_symbol,
                crypto = %config.crypto_symbol,
                forex = %config.forex_pair,
                interval_secs = config.refresh_interval.as_secs(),
                real = config.use_real_data,
                "configuration changed; restarting refresh cycle"
            );
            Wake::Restart
        } else {
            Wake::Idle
        }
    }
}
