//! Board endpoints: paged search, per-job detail, and the availability check.

use crate::{
    config::Config,
    error::{Result, ScrapeError},
    http::{HttpClient, HttpRequest, HttpResponse},
    models::{DetailEnvelope, JobDetail, SearchEnvelope, SearchResultItem},
};
use serde::Serialize;
use tracing::{error, info, warn};

/// Outcome of checking a job's canonical page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    Available,
    /// No canonical URL; nothing was checked.
    Unchecked,
    Unavailable {
        status: u16,
        marker: Option<String>,
    },
    CheckFailed {
        message: String,
    },
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available | Availability::Unchecked)
    }
}

pub struct BoardApi<C: HttpClient> {
    cfg: Config,
    client: C,
    markers: Vec<String>,
}

impl<C: HttpClient> BoardApi<C> {
    pub fn new(cfg: &Config, client: C) -> Self {
        let markers = cfg
            .availability
            .unavailable_markers
            .iter()
            .map(|m| m.to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        Self {
            cfg: cfg.clone(),
            client,
            markers,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.cfg.api.base_url
    }

    pub fn search_request(&self, query: &str, start: u64) -> HttpRequest {
        let s = &self.cfg.search;
        HttpRequest::api(format!("{}{}", self.cfg.api.base_url, self.cfg.api.search_path))
            .param("start", start)
            .param("sort", &s.sort)
            .param("limit", s.page_size)
            .param("query", query)
            .param("queryDerived", s.query_derived)
            .param("jobFreshness", s.job_freshness_days)
    }

    /// One search page. An empty `Vec` means the board has nothing more.
    pub async fn search(&self, query: &str, start: u64) -> Result<Vec<SearchResultItem>> {
        info!("Fetching jobs for query: {query}, start: {start}");
        let req = self.search_request(query, start);
        let resp = self.client.get(&req).await?;
        ensure_ok(&req, &resp)?;

        let env: SearchEnvelope =
            serde_json::from_str(&resp.body).map_err(|source| ScrapeError::Decode {
                what: "search response",
                source,
            })?;
        let payload = env
            .job_search_response
            .ok_or(ScrapeError::MissingEnvelope("jobSearchResponse"))?;
        let jobs = payload.data.unwrap_or_default();
        info!("Found {} jobs", jobs.len());
        Ok(jobs)
    }

    pub async fn detail(&self, job_id: &str) -> Result<JobDetail> {
        info!("Getting details for job ID: {job_id}");
        let req = HttpRequest::api(format!(
            "{}{}/{}",
            self.cfg.api.base_url, self.cfg.api.detail_path, job_id
        ));
        let resp = self.client.get(&req).await?;
        ensure_ok(&req, &resp)?;

        let env: DetailEnvelope =
            serde_json::from_str(&resp.body).map_err(|source| ScrapeError::Decode {
                what: "detail response",
                source,
            })?;
        let payload = env
            .job_detail_response
            .filter(|m| !m.is_empty())
            .ok_or(ScrapeError::MissingEnvelope("jobDetailResponse"))?;
        serde_json::from_value(serde_json::Value::Object(payload)).map_err(|source| {
            ScrapeError::Decode {
                what: "job detail",
                source,
            }
        })
    }

    /// GET the job page (redirects followed) and look for withdrawal signs.
    pub async fn availability(&self, job_url: Option<&str>) -> Availability {
        let url = match job_url {
            Some(u) if !u.is_empty() => u,
            _ => return Availability::Unchecked,
        };

        let resp = match self.client.get(&HttpRequest::bare(url)).await {
            Ok(resp) => resp,
            Err(err) => {
                error!("Error checking job availability: {err}");
                return Availability::CheckFailed {
                    message: err.to_string(),
                };
            }
        };

        let marker = self.find_marker(&resp.body);
        if !resp.is_ok() || marker.is_some() {
            warn!(
                "Job is unavailable: {url} , status code: {}, unavailability: {}",
                resp.status,
                marker.is_some()
            );
            return Availability::Unavailable {
                status: resp.status,
                marker,
            };
        }
        Availability::Available
    }

    fn find_marker(&self, body: &str) -> Option<String> {
        if self.markers.is_empty() {
            return None;
        }
        let lowered = body.to_lowercase();
        self.markers
            .iter()
            .find(|m| lowered.contains(m.as_str()))
            .cloned()
    }
}

fn ensure_ok(req: &HttpRequest, resp: &HttpResponse) -> Result<()> {
    if resp.is_ok() {
        Ok(())
    } else {
        Err(ScrapeError::Status {
            status: resp.status,
            url: req.url.clone(),
        })
    }
}
