use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub search: Search,
    #[serde(default)]
    pub concurrency: Concurrency,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Global {
    pub print_summary: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Search {
    pub queries: Vec<String>,
    pub job_freshness_days: u32,
    pub page_size: u32,
    pub sort: String,
    pub query_derived: bool,
    /// 0 means no cap; pagination ends on the first empty page.
    pub max_pages_per_query: u32,
    /// Extra attempts for a failed page fetch. Empty pages are never retried.
    pub page_fetch_retries: u32,
}
impl Default for Search {
    fn default() -> Self {
        Self {
            queries: vec![
                "aws".into(),
                "python".into(),
                "java".into(),
                "devops".into(),
                "data science".into(),
                "machine learning".into(),
            ],
            job_freshness_days: 1,
            page_size: 100,
            sort: "1".into(),
            query_derived: true,
            max_pages_per_query: 0,
            page_fetch_retries: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Concurrency {
    pub batch_threshold: usize,
    pub max_parallel_jobs: usize,
}
impl Default for Concurrency {
    fn default() -> Self {
        Self {
            batch_threshold: 50,
            max_parallel_jobs: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub search_path: String,
    pub detail_path: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    pub headers: BTreeMap<String, String>,
}
impl Default for Api {
    fn default() -> Self {
        let headers = [
            ("accept", "application/json, text/plain, */*"),
            ("accept-language", "en-US,en;q=0.9"),
            ("priority", "u=1, i"),
            (
                "referer",
                "https://www.foundit.in/srp/results?query=python&locations=",
            ),
            (
                "user-agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
            ),
            ("x-language-code", "EN"),
            ("x-source-country", "IN"),
            ("x-source-freshpaint-id", "null"),
            ("x-source-site-context", "rexmonster"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            base_url: "https://www.foundit.in".into(),
            search_path: "/middleware/jobsearch".into(),
            detail_path: "/middleware/jobdetail".into(),
            timeout_seconds: 30,
            max_redirects: 10,
            headers,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    pub unavailable_markers: Vec<String>,
}

/// Opt-in cleanup passes; all off keeps the extracted text verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub normalize_unicode: bool,
    pub trim_trailing_whitespace: bool,
    pub collapse_blank_lines: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub out_dir: String,
    pub file_prefix: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            out_dir: ".".into(),
            file_prefix: "monster_jobs".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "scraper.log".into(),
        }
    }
}
