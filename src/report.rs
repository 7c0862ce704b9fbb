use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub started: String,
    pub finished: String,
    pub output_file: String,
    pub queries: Vec<QueryReport>,
}

impl RunReport {
    pub fn total_saved(&self) -> usize {
        self.queries.iter().map(|q| q.saved).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryReport {
    pub query: String,
    pub pages_fetched: u32,
    pub items_seen: usize,
    pub saved: usize,
    pub unavailable: usize,
    pub detail_failed: usize,
    pub failed: usize,
    pub stop: StopReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    #[default]
    EmptyPage,
    FetchFailed,
    PageCap,
}

/// What one enrichment task ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichOutcome {
    Saved { total_in_file: usize },
    Unavailable,
    DetailFailed,
}

impl QueryReport {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Default::default()
        }
    }

    pub fn tally(&mut self, outcome: &EnrichOutcome) {
        match outcome {
            EnrichOutcome::Saved { .. } => self.saved += 1,
            EnrichOutcome::Unavailable => self.unavailable += 1,
            EnrichOutcome::DetailFailed => self.detail_failed += 1,
        }
    }
}
