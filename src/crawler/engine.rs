//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates fetching,
//! extraction, and frontier admission for one job, including:
//! - Sequential fetch -> extract -> enqueue traversal of the frontier
//! - Page-budget and time-ceiling enforcement
//! - Streaming delivery with backpressure (bounded channel) and
//!   cooperative cancellation
//! - The per-page failure policy: one bad page is a warning, never a job
//!   failure
//!
//! Every job owns its frontier, HTTP client, and state; concurrent jobs
//! cannot interfere with each other.

use crate::config::Config;
use crate::crawler::extractor::{extract, ExtractedContent};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::{Frontier, PageLimit};
use crate::crawler::CrawlEvent;
use crate::record::PageRecord;
use crate::state::{JobState, Progress};
use crate::url::{normalize_url, ScopeDomain};
use crate::{SiphonError, UrlError};
use std::collections::HashSet;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Delivery mode of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlMode {
    /// Fetch exactly the seed page; no link following
    Single,

    /// Drive the loop to completion, return all records at once
    Batch,

    /// Emit each record to the consumer as soon as it is produced
    Stream,
}

impl fmt::Display for CrawlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Batch => "batch",
            Self::Stream => "stream",
        };
        write!(f, "{}", name)
    }
}

/// One crawl request: a validated seed plus its execution parameters
///
/// Created once per request; a job cannot be restarted - re-crawling
/// requires a fresh job.
#[derive(Debug, Clone)]
pub struct CrawlJob {
    /// The normalized seed URL
    pub seed: Url,

    /// The host the crawl is confined to, derived from the seed
    pub scope: ScopeDomain,

    /// Page budget
    pub limit: PageLimit,

    /// Per-request fetch timeout
    pub timeout: Duration,

    /// Delivery mode
    pub mode: CrawlMode,
}

impl CrawlJob {
    /// Builds a job from a raw seed URL
    ///
    /// Fails when the seed does not normalize to a crawlable HTTP(S) URL;
    /// this is the only error that aborts a crawl before it starts.
    pub fn new(
        seed_url: &str,
        mode: CrawlMode,
        limit: PageLimit,
        timeout: Duration,
        extra_tracking: &[String],
    ) -> Result<Self, UrlError> {
        let seed = normalize_url(seed_url, None, extra_tracking)?;
        let scope = ScopeDomain::from_url(&seed)?;

        Ok(Self {
            seed,
            scope,
            limit,
            timeout,
            mode,
        })
    }
}

/// The crawl engine
///
/// Holds the configuration shared by all jobs; each run builds its own
/// HTTP client and frontier, so an `Engine` can serve any number of
/// concurrent, fully isolated jobs.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Creates an engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The engine's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches and extracts exactly one page
    ///
    /// The frontier is never constructed: links on the page are reported in
    /// the record but nothing is enqueued or followed.
    ///
    /// # Errors
    ///
    /// Unlike the multi-page modes, a fetch failure here is terminal -
    /// there is no other page to fall back to.
    pub async fn run_single(
        &self,
        seed_url: &str,
        timeout: Option<Duration>,
    ) -> Result<PageRecord, SiphonError> {
        let timeout = self.timeout_or_default(timeout);
        let extra_tracking = &self.config.normalizer.extra_tracking_params;
        let job = CrawlJob::new(
            seed_url,
            CrawlMode::Single,
            PageLimit::Bounded(1),
            timeout,
            extra_tracking,
        )?;

        let client = build_http_client(&self.config.fetcher, timeout)?;

        tracing::info!("Fetching single page {}", job.seed);
        let fetched = fetch_page(&client, &job.seed).await?;
        let extracted = extract(&fetched.body, &job.seed);

        Ok(build_record(&job.seed, extracted, extra_tracking))
    }

    /// Crawls from the seed and returns the complete record set at once
    ///
    /// Per-page failures are logged and skipped; only an invalid seed (or
    /// an unrecoverable internal error) produces an `Err`.
    pub async fn run_batch(
        &self,
        seed_url: &str,
        limit: PageLimit,
        timeout: Option<Duration>,
    ) -> Result<Vec<PageRecord>, SiphonError> {
        let timeout = self.timeout_or_default(timeout);
        let job = CrawlJob::new(
            seed_url,
            CrawlMode::Batch,
            limit,
            timeout,
            &self.config.normalizer.extra_tracking_params,
        )?;

        let mut stream = self.spawn_job(job);
        let mut records = Vec::new();

        while let Some(event) = stream.next().await {
            match event {
                CrawlEvent::Page { record } => records.push(record),
                CrawlEvent::Error { message } => return Err(SiphonError::Job(message)),
                _ => {}
            }
        }

        Ok(records)
    }

    /// Crawls from the seed, delivering events as they are produced
    ///
    /// The returned [`CrawlStream`] yields `start`, then `page`/`progress`/
    /// `warning` events, and always closes with a terminal `complete`,
    /// `error`, or `cancelled` event. Dropping the stream (or calling
    /// [`CrawlStream::cancel`]) stops the producer at the next safe point.
    pub fn run_stream(
        &self,
        seed_url: &str,
        limit: PageLimit,
        timeout: Option<Duration>,
    ) -> Result<CrawlStream, SiphonError> {
        let timeout = self.timeout_or_default(timeout);
        let job = CrawlJob::new(
            seed_url,
            CrawlMode::Stream,
            limit,
            timeout,
            &self.config.normalizer.extra_tracking_params,
        )?;

        Ok(self.spawn_job(job))
    }

    /// Spawns the crawl loop as a producer task behind a bounded channel
    fn spawn_job(&self, job: CrawlJob) -> CrawlStream {
        let (tx, rx) = mpsc::channel(self.config.engine.stream_buffer);
        let cancel = CancellationToken::new();

        tokio::spawn(drive_crawl(job, self.config.clone(), tx, cancel.clone()));

        CrawlStream {
            events: ReceiverStream::new(rx),
            cancel,
        }
    }

    fn timeout_or_default(&self, timeout: Option<Duration>) -> Duration {
        timeout.unwrap_or(Duration::from_secs(self.config.engine.default_timeout_secs))
    }
}

/// A live crawl's event stream
///
/// Backpressure is inherent: the producer suspends when the consumer falls
/// behind by more than the configured buffer. Dropping the stream cancels
/// the underlying job.
pub struct CrawlStream {
    events: ReceiverStream<CrawlEvent>,
    cancel: CancellationToken,
}

impl CrawlStream {
    /// Signals the producer to stop at the next safe point
    ///
    /// The in-flight fetch/extract completes, no further `page` events are
    /// emitted, and the stream closes with a `cancelled` event.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this crawl when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Stream for CrawlStream {
    type Item = CrawlEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}

impl Drop for CrawlStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Why an emit did not complete
enum EmitStop {
    /// The consumer asked the job to stop
    Cancelled,

    /// The consumer is gone; nobody will read further events
    Disconnected,
}

/// Sends an event, suspending on backpressure, aborting on cancellation
async fn emit(
    tx: &mpsc::Sender<CrawlEvent>,
    cancel: &CancellationToken,
    event: CrawlEvent,
) -> Result<(), EmitStop> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(EmitStop::Cancelled),
        result = tx.send(event) => result.map_err(|_| EmitStop::Disconnected),
    }
}

/// Runs the crawl loop for one job, producing events into `tx`
///
/// The loop checks the stopping condition before every fetch:
/// 1. Cancellation
/// 2. Page budget (bounded mode)
/// 3. Wall-clock ceiling (unbounded mode)
/// 4. Frontier exhaustion
///
/// A page that fails to fetch is marked visited (so it is never retried),
/// reported as a warning, and skipped. Exactly one terminal event closes
/// the stream.
async fn drive_crawl(
    job: CrawlJob,
    config: Config,
    tx: mpsc::Sender<CrawlEvent>,
    cancel: CancellationToken,
) {
    tracing::info!(
        "Starting {} crawl of {} (scope: {})",
        job.mode,
        job.seed,
        job.scope
    );

    let client = match build_http_client(&config.fetcher, job.timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            let _ = tx
                .send(CrawlEvent::Error {
                    message: format!("failed to build HTTP client: {}", e),
                })
                .await;
            return;
        }
    };

    let extra_tracking = config.normalizer.extra_tracking_params.clone();
    let mut frontier = Frontier::new(job.scope.clone(), job.limit, extra_tracking.clone());
    frontier.seed(job.seed.clone());

    let mut state = JobState::Running;
    let mut count = 0usize;
    let started = Instant::now();
    let ceiling = Duration::from_secs(config.engine.unbounded_time_ceiling_secs);

    if let Err(stop) = emit(
        &tx,
        &cancel,
        CrawlEvent::Start {
            seed: job.seed.to_string(),
        },
    )
    .await
    {
        if matches!(stop, EmitStop::Cancelled) {
            let _ = tx.try_send(CrawlEvent::Cancelled { total: 0 });
        }
        return;
    }

    loop {
        if cancel.is_cancelled() {
            state = JobState::Cancelled;
            break;
        }

        if job.limit.reached(count) {
            tracing::info!("Page budget reached after {} pages", count);
            state = JobState::Completed;
            break;
        }

        if matches!(job.limit, PageLimit::Unbounded) && started.elapsed() >= ceiling {
            tracing::info!(
                "Time ceiling of {:?} reached after {} pages",
                ceiling,
                count
            );
            state = JobState::Completed;
            break;
        }

        let url = match frontier.next() {
            Some(url) => url,
            None => {
                state = JobState::Exhausted;
                break;
            }
        };

        // Mark before fetching so a failing page is never retried
        frontier.mark_visited(&url);

        tracing::debug!("Fetching {}", url);
        let fetched = match fetch_page(&client, &url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                match emit(
                    &tx,
                    &cancel,
                    CrawlEvent::Warning {
                        url: url.to_string(),
                        message: e.to_string(),
                    },
                )
                .await
                {
                    Ok(()) => continue,
                    Err(EmitStop::Cancelled) => {
                        state = JobState::Cancelled;
                        break;
                    }
                    Err(EmitStop::Disconnected) => return,
                }
            }
        };

        let extracted = extract(&fetched.body, &url);

        for link in &extracted.outbound_links {
            frontier.enqueue(link.as_str(), &url);
        }

        let record = build_record(&url, extracted, &extra_tracking);
        count += 1;

        let progress = Progress {
            current_count: count,
            total_target: job.limit.target(),
            queue_size: frontier.queue_size(),
        };

        match emit(&tx, &cancel, CrawlEvent::Page { record }).await {
            Ok(()) => {}
            Err(EmitStop::Cancelled) => {
                state = JobState::Cancelled;
                break;
            }
            Err(EmitStop::Disconnected) => return,
        }

        match emit(&tx, &cancel, CrawlEvent::Progress { progress }).await {
            Ok(()) => {}
            Err(EmitStop::Cancelled) => {
                state = JobState::Cancelled;
                break;
            }
            Err(EmitStop::Disconnected) => return,
        }
    }

    tracing::info!(
        "Crawl {} after {} pages in {:?}",
        state,
        count,
        started.elapsed()
    );

    match state {
        JobState::Cancelled => {
            // The consumer may have stopped reading; do not block on a full
            // buffer for a stream nobody drains
            let _ = tx.try_send(CrawlEvent::Cancelled { total: count });
        }
        _ => {
            let _ = tx.send(CrawlEvent::Complete { total: count }).await;
        }
    }
}

/// Builds the immutable record for one extracted page
///
/// Outbound links are normalized and deduplicated while preserving
/// document order; unnormalizable links are dropped from the record.
fn build_record(url: &Url, extracted: ExtractedContent, extra_tracking: &[String]) -> PageRecord {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for link in extracted.outbound_links {
        if let Ok(normalized) = normalize_url(link.as_str(), None, extra_tracking) {
            if seen.insert(normalized.to_string()) {
                links.push(normalized);
            }
        }
    }

    PageRecord::new(url, extracted.title, extracted.content, links)
}
