//! Worker pool: bounded task/result channels and retry discipline.

pub mod error;
pub mod stats;
pub mod task;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub use error::WorkerEngineError;
pub use stats::{Stats, StatsSnapshot};
pub use task::{ResultStatus, Task, TaskResult};

use crate::config::EngineConfig;
use crate::proxy_pool::ProxyPool;
use crate::search_backend::{Classification, SearchBackend};
use crate::stealth::StealthController;

struct Channels {
    task_tx: mpsc::Sender<Task>,
    task_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<Task>>>,
    result_tx: mpsc::Sender<TaskResult>,
    result_rx: Mutex<Option<mpsc::Receiver<TaskResult>>>,
}

pub struct WorkerEngine {
    cfg: Arc<EngineConfig>,
    pool: Arc<ProxyPool>,
    stealth: Arc<StealthController>,
    backend: Arc<dyn SearchBackend>,
    stats: Arc<Stats>,
    running: AtomicBool,
    shutdown_tx: Mutex<Option<watch::Sender<bool>>>,
    channels: Mutex<Option<Channels>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerEngine {
    #[must_use]
    pub fn new(
        cfg: Arc<EngineConfig>,
        pool: Arc<ProxyPool>,
        stealth: Arc<StealthController>,
        backend: Arc<dyn SearchBackend>,
    ) -> Self {
        WorkerEngine {
            cfg,
            pool,
            stealth,
            backend,
            stats: Arc::new(Stats::new()),
            running: AtomicBool::new(false),
            shutdown_tx: Mutex::new(None),
            channels: Mutex::new(None),
            handles: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Idempotent: returns immediately if already running.
    pub fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let (task_tx, task_rx) = mpsc::channel::<Task>(self.cfg.buffer_size());
        let (result_tx, result_rx) = mpsc::channel::<TaskResult>(self.cfg.buffer_size());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task_rx = Arc::new(tokio::sync::Mutex::new(task_rx));

        *self.channels.lock() = Some(Channels {
            task_tx: task_tx.clone(),
            task_rx: Arc::clone(&task_rx),
            result_tx: result_tx.clone(),
            result_rx: Mutex::new(Some(result_rx)),
        });
        *self.shutdown_tx.lock() = Some(shutdown_tx);

        let mut handles = Vec::with_capacity(self.cfg.workers());
        for _ in 0..self.cfg.workers() {
            let engine = Arc::clone(self);
            let task_rx = Arc::clone(&task_rx);
            let task_tx = task_tx.clone();
            let result_tx = result_tx.clone();
            let mut shutdown_rx = shutdown_rx.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    let maybe_task = {
                        let mut rx = task_rx.lock().await;
                        tokio::select! {
                            biased;
                            _ = shutdown_rx.changed() => {
                                if *shutdown_rx.borrow() {
                                    None
                                } else {
                                    continue;
                                }
                            }
                            task = rx.recv() => task,
                        }
                    };
                    let Some(task) = maybe_task else { break };
                    engine
                        .process_task(task, &task_tx, &result_tx, &shutdown_rx)
                        .await;
                }
            }));
        }
        *self.handles.lock() = handles;
    }

    /// Idempotent: signals termination, waits for workers to drain, then
    /// drains whatever is left in the task queue — those tasks were never
    /// picked up, so each is counted into `tasks_failed` and given a
    /// terminal "dropped at stop" result — before closing both channels.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(tx) = self.shutdown_tx.lock().take() {
            let _ = tx.send(true);
        }
        let handles = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            let _ = handle.await;
        }

        let channels = self.channels.lock().take();
        if let Some(channels) = channels {
            let mut task_rx = channels.task_rx.lock().await;
            while let Ok(task) = task_rx.try_recv() {
                self.stats.incr_failed();
                let result = TaskResult::terminal(
                    &task,
                    ResultStatus::Error,
                    Vec::new(),
                    Some("dropped at stop".to_string()),
                    None,
                    std::time::Duration::ZERO,
                );
                let _ = channels.result_tx.try_send(result);
            }
        }
    }

    /// Non-blocking enqueue. Increments `tasks_total` on success.
    pub fn submit(&self, task: Task) -> Result<(), WorkerEngineError> {
        let channels = self.channels.lock();
        let Some(channels) = channels.as_ref() else {
            return Err(WorkerEngineError::NotRunning);
        };
        channels
            .task_tx
            .try_send(task)
            .map_err(|_| WorkerEngineError::BufferFull)?;
        self.stats.incr_submitted();
        Ok(())
    }

    /// Takes ownership of the result stream. May only be called once per
    /// `start()`/`stop()` cycle — the channel is single-consumer.
    pub fn take_results(&self) -> Option<mpsc::Receiver<TaskResult>> {
        let channels = self.channels.lock();
        channels.as_ref().and_then(|c| c.result_rx.lock().take())
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    async fn process_task(
        &self,
        mut task: Task,
        task_tx: &mpsc::Sender<Task>,
        result_tx: &mpsc::Sender<TaskResult>,
        shutdown_rx: &watch::Receiver<bool>,
    ) {
        let guard = match self.pool.acquire(&self.cfg).await {
            Ok(g) => g,
            Err(_) => {
                self.stats.incr_failed();
                let result = TaskResult::terminal(
                    &task,
                    ResultStatus::Error,
                    Vec::new(),
                    Some("no_proxy_available".to_string()),
                    None,
                    std::time::Duration::ZERO,
                );
                let _ = result_tx.try_send(result);
                return;
            }
        };

        let url = crate::search_backend::url_builder::build(
            &task.dork,
            task.page,
            self.cfg.results_per_page(),
        );
        let fingerprint = self.stealth.prepare(&guard.entry.id).await;

        if *shutdown_rx.borrow() {
            return;
        }

        // Cancelled requests count as neither success nor failure — the
        // task is simply dropped, same as an unpicked queued task.
        let mut shutdown_wait = shutdown_rx.clone();
        let outcome = tokio::select! {
            biased;
            _ = shutdown_wait.changed() => return,
            outcome = self.backend.search(url.as_str(), &guard.entry, fingerprint, &self.cfg) => outcome,
        };

        let Ok(outcome) = outcome else {
            self.report_and_maybe_retry(
                &mut task,
                &guard.entry.id,
                ResultStatus::Error,
                Vec::new(),
                Some("transport_error".to_string()),
                std::time::Duration::ZERO,
                task_tx,
                result_tx,
            );
            return;
        };

        match outcome.classification {
            Classification::Success => {
                self.pool.get(&guard.entry.id).inspect(|e| {
                    e.report_success(outcome.latency, &self.cfg);
                });
                self.stealth.record_success(&guard.entry.id);
                self.stats.incr_completed(outcome.urls.len());
                let result = TaskResult::terminal(
                    &task,
                    ResultStatus::Success,
                    outcome.urls,
                    None,
                    Some(guard.entry.id.clone()),
                    outcome.latency,
                );
                let _ = result_tx.try_send(result);
            }
            Classification::NoResults => {
                self.pool.get(&guard.entry.id).inspect(|e| {
                    e.report_success(outcome.latency, &self.cfg);
                });
                self.stealth.record_success(&guard.entry.id);
                self.stats.incr_completed(0);
                let result = TaskResult::terminal(
                    &task,
                    ResultStatus::NoResults,
                    Vec::new(),
                    None,
                    Some(guard.entry.id.clone()),
                    outcome.latency,
                );
                let _ = result_tx.try_send(result);
            }
            Classification::Captcha => {
                self.pool.get(&guard.entry.id).inspect(|e| {
                    e.report_captcha(&self.cfg);
                });
                self.stealth.record_captcha(&guard.entry.id);
                self.stats.incr_captcha();
                self.report_and_maybe_retry(
                    &mut task,
                    &guard.entry.id,
                    ResultStatus::Captcha,
                    Vec::new(),
                    Some("captcha".to_string()),
                    outcome.latency,
                    task_tx,
                    result_tx,
                );
            }
            Classification::Blocked | Classification::RateLimit => {
                self.pool.get(&guard.entry.id).inspect(|e| {
                    e.report_block(&self.cfg);
                });
                self.stealth.record_block(&guard.entry.id);
                self.stats.incr_block();
                self.report_and_maybe_retry(
                    &mut task,
                    &guard.entry.id,
                    ResultStatus::Blocked,
                    Vec::new(),
                    Some("blocked".to_string()),
                    outcome.latency,
                    task_tx,
                    result_tx,
                );
            }
            Classification::Error => {
                self.pool.get(&guard.entry.id).inspect(|e| {
                    e.report_failure(&self.cfg);
                });
                self.stealth.record_error(&guard.entry.id);
                self.report_and_maybe_retry(
                    &mut task,
                    &guard.entry.id,
                    ResultStatus::Error,
                    Vec::new(),
                    Some("transport_error".to_string()),
                    outcome.latency,
                    task_tx,
                    result_tx,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn report_and_maybe_retry(
        &self,
        task: &mut Task,
        proxy_id: &str,
        status: ResultStatus,
        urls: Vec<String>,
        error: Option<String>,
        duration: std::time::Duration,
        task_tx: &mpsc::Sender<Task>,
        result_tx: &mpsc::Sender<TaskResult>,
    ) {
        if task.retry < self.cfg.max_retries() {
            task.retry += 1;
            if task_tx.try_send(task.clone()).is_ok() {
                return;
            }
            // Retry buffer full — terminal for this task.
            self.stats.incr_failed();
            let result = TaskResult::terminal(
                task,
                ResultStatus::Error,
                Vec::new(),
                Some("buffer_full".to_string()),
                Some(proxy_id.to_string()),
                duration,
            );
            let _ = result_tx.try_send(result);
            return;
        }
        self.stats.incr_failed();
        let result = TaskResult::terminal(
            task,
            status,
            urls,
            error,
            Some(proxy_id.to_string()),
            duration,
        );
        let _ = result_tx.try_send(result);
    }
}
