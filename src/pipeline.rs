use crate::{
    api::BoardApi,
    config::Config,
    error::Result,
    http::HttpClient,
    models::SearchResultItem,
    normalize::build_record,
    report::{EnrichOutcome, QueryReport, RunReport, StopReason},
    store::DailyJsonStore,
    text::description_to_text,
    util::now_rfc3339,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub struct Pipeline<C: HttpClient> {
    cfg: Config,
    api: BoardApi<C>,
    store: DailyJsonStore,
    limiter: Semaphore,
}

impl<C: HttpClient + 'static> Pipeline<C> {
    pub fn new(cfg: &Config, client: C, store: DailyJsonStore) -> Arc<Self> {
        Arc::new(Self {
            cfg: cfg.clone(),
            api: BoardApi::new(cfg, client),
            store,
            limiter: Semaphore::new(cfg.concurrency.max_parallel_jobs.max(1)),
        })
    }

    pub fn api(&self) -> &BoardApi<C> {
        &self.api
    }

    pub fn store(&self) -> &DailyJsonStore {
        &self.store
    }

    /// Queries run one after another; a failing query never stops the rest.
    pub async fn run(self: &Arc<Self>, queries: &[String]) -> RunReport {
        let started = now_rfc3339();
        let mut reports = Vec::with_capacity(queries.len());

        for query in queries {
            info!("Starting the scraper for query: {query}");
            reports.push(self.run_query(query).await);
        }

        RunReport {
            started,
            finished: now_rfc3339(),
            output_file: self.store.today_path().display().to_string(),
            queries: reports,
        }
    }

    /// Page through one query, fanning every item out to an enrichment task.
    ///
    /// Tasks pile up across pages and are drained once `batch_threshold` of
    /// them are pending. The check runs per page, so a full page can push the
    /// pending count past the threshold.
    pub async fn run_query(self: &Arc<Self>, query: &str) -> QueryReport {
        let mut report = QueryReport::new(query);
        let mut active: JoinSet<Result<EnrichOutcome>> = JoinSet::new();

        let page_size = u64::from(self.cfg.search.page_size.max(1));
        let threshold = self.cfg.concurrency.batch_threshold.max(1);
        let max_pages = self.cfg.search.max_pages_per_query;
        let mut start = 0u64;

        loop {
            if max_pages > 0 && report.pages_fetched >= max_pages {
                info!("page cap {max_pages} reached for query: {query}");
                report.stop = StopReason::PageCap;
                break;
            }

            let Some(jobs) = self.fetch_page(query, start).await else {
                report.stop = StopReason::FetchFailed;
                break;
            };
            if jobs.is_empty() {
                report.stop = StopReason::EmptyPage;
                break;
            }

            report.pages_fetched += 1;
            report.items_seen += jobs.len();

            for item in jobs {
                let this = Arc::clone(self);
                active.spawn(async move { this.enrich_limited(item).await });
            }

            if active.len() >= threshold {
                debug!("draining {} pending jobs", active.len());
                drain(&mut active, &mut report).await;
            }

            start += page_size;
        }

        drain(&mut active, &mut report).await;

        info!(
            "query={} pages={} seen={} saved={} unavailable={} detail_failed={} failed={} stop={:?}",
            report.query,
            report.pages_fetched,
            report.items_seen,
            report.saved,
            report.unavailable,
            report.detail_failed,
            report.failed,
            report.stop
        );
        report
    }

    /// `None` when every attempt failed; callers treat it as end of results.
    async fn fetch_page(&self, query: &str, start: u64) -> Option<Vec<SearchResultItem>> {
        let retries = self.cfg.search.page_fetch_retries;
        for attempt in 0..=retries {
            match self.api.search(query, start).await {
                Ok(jobs) => return Some(jobs),
                Err(err) => {
                    error!("Failed to fetch jobs: {err}");
                    if attempt < retries {
                        warn!(
                            "retrying page query={query} start={start} ({}/{retries})",
                            attempt + 1
                        );
                    }
                }
            }
        }
        None
    }

    async fn enrich_limited(&self, item: SearchResultItem) -> Result<EnrichOutcome> {
        let _permit = self.limiter.acquire().await.ok();
        self.enrich(&item).await
    }

    /// Detail fetch, availability check, normalization and append for one row.
    pub async fn enrich(&self, item: &SearchResultItem) -> Result<EnrichOutcome> {
        debug!("Parsing job data for job ID: {}", item.job_id);

        let detail = match self.api.detail(&item.job_id).await {
            Ok(detail) => detail,
            Err(err) => {
                error!("Failed to get job details for job ID {}: {err}", item.job_id);
                return Ok(EnrichOutcome::DetailFailed);
            }
        };

        let availability = self.api.availability(detail.redirect_url.as_deref()).await;
        if !availability.is_available() {
            return Ok(EnrichOutcome::Unavailable);
        }

        debug!("Getting description for jobid: {}", item.job_id);
        let text = description_to_text(
            &self.cfg.description,
            detail.description.as_deref().unwrap_or_default(),
        );

        let record = build_record(self.api.base_url(), item, &detail, text);
        let total_in_file = self.store.append(&record).await?;
        Ok(EnrichOutcome::Saved { total_in_file })
    }
}

async fn drain(active: &mut JoinSet<Result<EnrichOutcome>>, report: &mut QueryReport) {
    while let Some(joined) = active.join_next().await {
        match joined {
            Ok(Ok(outcome)) => report.tally(&outcome),
            Ok(Err(err)) => {
                error!("Error parsing job data: {err}");
                report.failed += 1;
            }
            Err(err) => {
                error!("Error processing job: {err}");
                report.failed += 1;
            }
        }
    }
}
