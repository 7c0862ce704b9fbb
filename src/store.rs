use crate::{
    config::Config,
    error::{Result, ScrapeError},
    models::NormalizedJobRecord,
    util::today,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Append-only daily JSON output, `<out_dir>/<prefix>_<YYYY-MM-DD>.json`.
///
/// Each append rewrites the whole array. All appends through one store
/// instance are serialized, so concurrent enrichment tasks never lose each
/// other's records.
pub struct DailyJsonStore {
    out_dir: PathBuf,
    prefix: String,
    writer: Mutex<()>,
}

impl DailyJsonStore {
    pub fn new(out_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            prefix: prefix.into(),
            writer: Mutex::new(()),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.output.out_dir, &cfg.output.file_prefix)
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.out_dir
            .join(format!("{}_{}.json", self.prefix, date.format("%Y-%m-%d")))
    }

    pub fn today_path(&self) -> PathBuf {
        self.path_for(today())
    }

    /// Append to today's file. Returns the number of records now stored.
    pub async fn append(&self, record: &NormalizedJobRecord) -> Result<usize> {
        self.append_on(today(), record).await
    }

    pub async fn append_on(&self, date: NaiveDate, record: &NormalizedJobRecord) -> Result<usize> {
        let _guard = self.writer.lock().await;
        let path = self.path_for(date);

        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| io_err(&self.out_dir, e))?;

        let mut jobs = load(&path).await?;
        let value = serde_json::to_value(record).map_err(|source| ScrapeError::Encode {
            what: "job record",
            source,
        })?;
        jobs.push(value);
        persist(&path, &jobs).await?;

        info!("Saved {} jobs to {}", jobs.len(), path.display());
        Ok(jobs.len())
    }
}

async fn load(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_err(path, e))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(jobs) => Ok(jobs),
        Err(e) => {
            warn!(
                "{} is corrupted ({}), creating backup and starting empty",
                path.display(),
                e
            );
            // A corrupt file is only replaced once its backup exists.
            let backup = backup_path(path);
            if let Err(backup_err) = tokio::fs::copy(path, &backup).await {
                error!(
                    "Failed to back up corrupted {}: {}",
                    path.display(),
                    backup_err
                );
                return Err(io_err(&backup, backup_err));
            }
            Ok(Vec::new())
        }
    }
}

/// Write to a sibling `.tmp` and rename over the target.
async fn persist(path: &Path, jobs: &[Value]) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(
        &mut buf,
        serde_json::ser::PrettyFormatter::with_indent(b"    "),
    );
    jobs.serialize(&mut ser)
        .map_err(|source| ScrapeError::Encode {
            what: "output file",
            source,
        })?;

    tokio::fs::write(&tmp_path, &buf)
        .await
        .map_err(|e| io_err(&tmp_path, e))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| io_err(path, e))?;
    Ok(())
}

pub fn backup_path(path: &Path) -> PathBuf {
    path.with_extension("json.bak")
}

fn io_err(path: &Path, source: std::io::Error) -> ScrapeError {
    ScrapeError::Io {
        path: path.display().to_string(),
        source,
    }
}
