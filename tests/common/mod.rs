#![allow(dead_code)]

use async_trait::async_trait;
use monster_scraper::{
    config::Config,
    error::{Result, ScrapeError},
    http::{HttpClient, HttpRequest, HttpResponse},
};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const BASE: &str = "https://board.test";

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Transport,
}

impl Reply {
    pub fn json(v: Value) -> Self {
        Reply::Status(200, v.to_string())
    }
}

/// In-memory board: routes by URL, records every request.
#[derive(Default)]
pub struct FakeBoard {
    pages: Mutex<HashMap<(String, u64), VecDeque<Reply>>>,
    details: Mutex<HashMap<String, Reply>>,
    job_pages: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl FakeBoard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replies are consumed in order; the last one repeats.
    pub fn page(&self, query: &str, start: u64, replies: Vec<Reply>) {
        self.pages
            .lock()
            .unwrap()
            .insert((query.to_string(), start), replies.into());
    }

    pub fn items_page(&self, query: &str, start: u64, ids: impl IntoIterator<Item = u64>) {
        let data: Vec<Value> = ids.into_iter().map(search_item).collect();
        self.page(
            query,
            start,
            vec![Reply::json(json!({"jobSearchResponse": {"data": data}}))],
        );
    }

    pub fn detail(&self, job_id: &str, reply: Reply) {
        self.details
            .lock()
            .unwrap()
            .insert(job_id.to_string(), reply);
    }

    pub fn job_page(&self, url: &str, reply: Reply) {
        self.job_pages.lock().unwrap().insert(url.to_string(), reply);
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<HttpRequest> {
        self.calls()
            .into_iter()
            .filter(|r| r.url.ends_with("/middleware/jobsearch"))
            .collect()
    }

    fn route(&self, req: &HttpRequest) -> Reply {
        if req.url.ends_with("/middleware/jobsearch") {
            let query = req.query_value("query").unwrap_or_default().to_string();
            let start = req
                .query_value("start")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            let mut pages = self.pages.lock().unwrap();
            return match pages.get_mut(&(query, start)) {
                Some(q) if q.len() > 1 => q.pop_front().unwrap(),
                Some(q) => q.front().cloned().unwrap(),
                None => Reply::json(json!({"jobSearchResponse": {"data": []}})),
            };
        }

        if let Some(id) = req.url.split("/middleware/jobdetail/").nth(1) {
            return self
                .details
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .unwrap_or_else(|| Reply::json(detail_body(id)));
        }

        self.job_pages
            .lock()
            .unwrap()
            .get(&req.url)
            .cloned()
            .unwrap_or_else(|| Reply::Status(200, "<html><body>Apply now</body></html>".into()))
    }
}

/// Client handle over a shared board, so tests keep inspecting the calls.
pub struct FakeClient(pub Arc<FakeBoard>);

impl FakeBoard {
    pub fn client(self: &Arc<Self>) -> FakeClient {
        FakeClient(Arc::clone(self))
    }
}

#[async_trait]
impl HttpClient for FakeClient {
    async fn get(&self, req: &HttpRequest) -> Result<HttpResponse> {
        self.0.calls.lock().unwrap().push(req.clone());
        match self.0.route(req) {
            Reply::Status(status, body) => Ok(HttpResponse { status, body }),
            Reply::Transport => Err(ScrapeError::Transport {
                url: req.url.clone(),
                message: "connection reset".into(),
            }),
        }
    }
}

pub fn job_page_url(id: &str) -> String {
    format!("https://jobs.test/job/{id}")
}

pub fn search_item(id: u64) -> Value {
    json!({
        "jobId": id,
        "title": format!("Engineer {id}"),
        "employmentTypes": ["Full time", "Permanent"],
        "createdAt": 1700000000000i64,
        "redirectUrl": format!("https://board.test/job/{id}"),
        "isEstimatedSalary": false,
    })
}

pub fn detail_body(id: &str) -> Value {
    json!({
        "jobDetailResponse": {
            "locations": [
                {"city": "", "state": "", "country": ""},
                {"city": "Pune", "state": "MH", "country": "IN"}
            ],
            "description": "<p>Build <b>things</b></p>",
            "company": {"name": "Acme"},
            "minimumSalary": {"absoluteValue": 50000},
            "maximumSalary": {"absoluteValue": 80000},
            "minimumExperience": {"years": 3},
            "applyUrl": "",
            "redirectUrl": job_page_url(id),
        }
    })
}

pub fn test_config(out_dir: &std::path::Path) -> Config {
    let mut cfg = Config::default();
    cfg.api.base_url = BASE.into();
    cfg.output.out_dir = out_dir.display().to_string();
    cfg.search.queries = vec!["x".into()];
    cfg
}
