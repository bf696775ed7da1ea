//! Timer that drives the refresh cycle.
//!
//! The scheduler owns a single task. Each iteration runs a cycle to completion
//! before sleeping, so a slow backend delays the next poll instead of piling
//! up concurrent ones. A period change only interrupts the sleep; a cycle in
//! flight always finishes.

use std::sync::Arc;

use railwatch_core::transit::FeedFetcher;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::RefreshPeriod;
use crate::refresh::RefreshCycle;

pub struct RefreshScheduler<F> {
    cycle: Arc<RefreshCycle<F>>,
    period: watch::Sender<RefreshPeriod>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<F: FeedFetcher + 'static> RefreshScheduler<F> {
    pub fn new(cycle: Arc<RefreshCycle<F>>) -> Self {
        Self {
            cycle,
            period: watch::Sender::new(RefreshPeriod::default()),
            task: Mutex::new(None),
        }
    }

    /// Refresh immediately, then every `period`.
    pub async fn start(&self, period: RefreshPeriod) {
        let mut task = self.task.lock().await;
        if let Some(previous) = task.take() {
            previous.abort();
        }

        self.period.send_replace(period);
        *task = Some(self.spawn(true));
        info!(seconds = period.seconds(), "refresh started");
    }

    /// Poll every `period` from now on, the first time one full period from
    /// now. The pending wait is cancelled; a running cycle is not.
    pub async fn set_period(&self, period: RefreshPeriod) {
        let mut task = self.task.lock().await;
        self.period.send_replace(period);

        if task.is_none() {
            *task = Some(self.spawn(false));
        }
        info!(seconds = period.seconds(), "refresh scheduled");
    }

    pub async fn stop(&self) {
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
            info!("refresh stopped");
        }
    }

    pub async fn period(&self) -> RefreshPeriod {
        *self.period.borrow()
    }

    #[cfg(test)]
    pub async fn is_running(&self) -> bool {
        self.task.lock().await.is_some()
    }

    fn spawn(&self, immediate: bool) -> JoinHandle<()> {
        tokio::spawn(refresh_loop(self.cycle.clone(), self.period.subscribe(), immediate))
    }
}

impl<F> Drop for RefreshScheduler<F> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

async fn refresh_loop<F: FeedFetcher>(
    cycle: Arc<RefreshCycle<F>>,
    mut period: watch::Receiver<RefreshPeriod>,
    immediate: bool,
) {
    if !immediate {
        wait(&mut period).await;
    }

    loop {
        if let Err(e) = cycle.run_once().await {
            error!("refresh failed: {e}");
        }
        wait(&mut period).await;
    }
}

/// Sleep one period. A period change restarts the wait with the new period.
async fn wait(period: &mut watch::Receiver<RefreshPeriod>) {
    loop {
        let duration = period.borrow_and_update().as_duration();
        tokio::select! {
            () = tokio::time::sleep(duration) => return,
            changed = period.changed() => {
                if changed.is_err() {
                    tokio::time::sleep(duration).await;
                    return;
                }
            }
        }
    }
}
