use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::{SampleScheduler, SamplerControl, TickOutcome};
use crate::core::metrics::MetricSample;
use crate::error::{Error, Result};

/// A running sampler
///
/// Dropping the handle signals the task to stop without waiting for it.
#[derive(Debug)]
pub struct SamplerHandle {
    control: SamplerControl,
    stop_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
    latest: watch::Receiver<Option<MetricSample>>,
}

pub(super) fn spawn(mut scheduler: SampleScheduler) -> SamplerHandle {
    let (stop_tx, mut stop_rx) = mpsc::channel(1);
    let (sample_tx, latest) = watch::channel(None);
    let control = scheduler.control();
    let period = scheduler.config().tick_period();

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(?period, "sampler started");

        loop {
            tokio::select! {
                biased;
                _ = stop_rx.recv() => break,
                _ = interval.tick() => {
                    if let TickOutcome::Applied(sample) = scheduler.tick().await {
                        sample_tx.send_replace(Some(sample));
                    }
                }
            }
        }

        info!("sampler stopped");
    });

    SamplerHandle { control, stop_tx, task: Some(task), latest }
}

impl SamplerHandle {
    pub fn control(&self) -> SamplerControl {
        self.control.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// The most recently applied live sample
    pub fn latest(&self) -> Option<MetricSample> {
        self.latest.borrow().clone()
    }

    /// Live samples applied from now on
    ///
    /// The stream ends once the sampler stops.
    pub fn samples(&self) -> impl Stream<Item = MetricSample> + Send + 'static {
        let mut rx = self.latest.clone();
        rx.mark_unchanged();

        futures::stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let sample = rx.borrow_and_update().clone()?;
            Some((sample, rx))
        })
    }

    /// Stops the sampler
    ///
    /// A tick already in progress is allowed to finish and its sample is applied;
    /// no further tick starts. Calling this again after the sampler stopped does
    /// nothing.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        // The task may already have exited; the send then fails harmlessly.
        let _ = self.stop_tx.send(()).await;

        task.await.map_err(|e| Error::scheduler(format!("sampler task failed: {e}")))
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        if self.task.take().is_some() {
            let _ = self.stop_tx.try_send(());
        }
    }
}
