use console_core::{Availability, AvailabilityCheck, Error, Result, config::ScheduleConfig};
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info};
use uuid::Uuid;

/// Receives every check result as it arrives.
pub trait ReportSink: Send + Sync {
    fn report(&self, availability: &Availability);
}

impl<T: ReportSink> ReportSink for Arc<T> {
    fn report(&self, availability: &Availability) {
        (**self).report(availability)
    }
}

/// Writes one `info` line per check: `console: {name}, availability: {bool}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&self, availability: &Availability) {
        info!("{}", availability);
    }
}

/// Fans a trigger out into one burst of checks per console.
pub struct Poller<C, S> {
    checker: Arc<C>,
    sink: Arc<S>,
    consoles: Arc<[String]>,
    burst_size: u32,
    burst_spacing: Duration,
}

impl<C, S> Clone for Poller<C, S> {
    fn clone(&self) -> Self {
        Self {
            checker: Arc::clone(&self.checker),
            sink: Arc::clone(&self.sink),
            consoles: Arc::clone(&self.consoles),
            burst_size: self.burst_size,
            burst_spacing: self.burst_spacing,
        }
    }
}

impl<C, S> Poller<C, S>
where
    C: AvailabilityCheck + 'static,
    S: ReportSink + 'static,
{
    pub fn new(checker: C, sink: S, consoles: Vec<String>, schedule: &ScheduleConfig) -> Self {
        Self {
            checker: Arc::new(checker),
            sink: Arc::new(sink),
            consoles: consoles.into(),
            burst_size: schedule.burst_size,
            burst_spacing: schedule.burst_spacing(),
        }
    }

    pub fn consoles(&self) -> &[String] {
        &self.consoles
    }

    /// Starts one burst per console and returns without waiting for them.
    /// Bursts from earlier triggers keep running.
    pub fn trigger(&self) -> Vec<JoinHandle<()>> {
        debug!("Triggering bursts for {} consoles", self.consoles.len());
        self.consoles
            .iter()
            .map(|console| tokio::spawn(self.clone().run_burst(console.clone())))
            .collect()
    }

    /// Dispatches `burst_size` checks for one console; check `i` starts
    /// `(i + 1) * burst_spacing` after the burst. Each check runs as its own
    /// task, so a slow response never delays the next one.
    pub async fn run_burst(self, console: String) {
        for _ in 0..self.burst_size {
            tokio::time::sleep(self.burst_spacing).await;

            let checker = Arc::clone(&self.checker);
            let sink = Arc::clone(&self.sink);
            let console = console.clone();
            tokio::spawn(async move {
                let availability = checker.check(&console).await;
                sink.report(&availability);
            });
        }
    }
}

pub struct ConsoleScheduler<C, S> {
    poller: Poller<C, S>,
    interval: Duration,
    scheduler: JobScheduler,
    job_id: Option<Uuid>,
}

impl<C, S> ConsoleScheduler<C, S>
where
    C: AvailabilityCheck + 'static,
    S: ReportSink + 'static,
{
    pub async fn new(
        checker: C,
        sink: S,
        consoles: Vec<String>,
        schedule: &ScheduleConfig,
    ) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| Error::scheduler(e.to_string()))?;

        Ok(Self {
            poller: Poller::new(checker, sink, consoles, schedule),
            interval: schedule.interval(),
            scheduler,
            job_id: None,
        })
    }

    /// Fires the startup trigger, then repeats it every `interval`.
    pub async fn start(&mut self) -> Result<()> {
        info!(
            "Starting console scheduler for {:?} (interval: {}s)",
            self.poller.consoles(),
            self.interval.as_secs()
        );

        self.poller.trigger();

        let poller = self.poller.clone();
        let job = Job::new_repeated_async(self.interval, move |_uuid, _l| {
            let poller = poller.clone();
            Box::pin(async move {
                poller.trigger();
            })
        })
        .map_err(|e| Error::scheduler(e.to_string()))?;

        let job_id = self.scheduler.add(job).await
            .map_err(|e| Error::scheduler(e.to_string()))?;
        self.job_id = Some(job_id);

        self.scheduler.start().await
            .map_err(|e| Error::scheduler(e.to_string()))?;

        info!("Console scheduler started successfully (job {})", job_id);
        Ok(())
    }

    /// Stops future triggers. Checks already in flight are left to finish.
    pub async fn stop(&mut self) -> Result<()> {
        info!("Stopping console scheduler");
        if let Some(job_id) = self.job_id.take() {
            self.scheduler.remove(&job_id).await
                .map_err(|e| Error::scheduler(e.to_string()))?;
        }
        self.scheduler.shutdown().await
            .map_err(|e| Error::scheduler(e.to_string()))?;
        info!("Console scheduler stopped");
        Ok(())
    }
}
