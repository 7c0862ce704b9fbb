use chrono::NaiveDate;
use monster_scraper::{
    error::ScrapeError,
    models::NormalizedJobRecord,
    store::{DailyJsonStore, backup_path},
};
use serde_json::{Number, Value};
use std::sync::Arc;

fn record(id: &str) -> NormalizedJobRecord {
    NormalizedJobRecord {
        domain: "https://www.foundit.in".into(),
        post_url: format!("https://www.foundit.in/job/{id}"),
        job_id: id.into(),
        title: format!("Job {id}"),
        city: "Pune".into(),
        state: "MH".into(),
        speciality: String::new(),
        job_type: "Full time".into(),
        job_details: "text".into(),
        industry: String::new(),
        company: "Acme".into(),
        posted_on: String::new(),
        salary_from: Number::from(0),
        salary_to: Number::from(0),
        payout_term: "yearly".into(),
        is_estimated_salary: false,
        scraped_on: "2026-10-19T10:00:00.000000+00:00".into(),
        experience: None,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn read(path: &std::path::Path) -> Vec<Value> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn file_name_is_keyed_by_date() {
    let store = DailyJsonStore::new("/data/out", "monster_jobs");
    assert_eq!(
        store.path_for(day()),
        std::path::PathBuf::from("/data/out/monster_jobs_2026-10-19.json")
    );
}

#[tokio::test]
async fn sequential_appends_keep_order_after_prior_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = DailyJsonStore::new(dir.path(), "monster_jobs");
    let path = store.path_for(day());
    std::fs::write(&path, r#"[{"JobID": "old"}]"#).unwrap();

    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        let total = store.append_on(day(), &record(id)).await.unwrap();
        assert_eq!(total, i + 2);
    }

    let ids: Vec<String> = read(&path)
        .iter()
        .map(|r| r["JobID"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["old", "a", "b", "c"]);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n    {"), "expected 4-space pretty output");
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn creates_missing_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = DailyJsonStore::new(dir.path().join("nested/out"), "jobs");
    store.append_on(day(), &record("1")).await.unwrap();
    assert_eq!(read(&store.path_for(day())).len(), 1);
}

#[tokio::test]
async fn concurrent_appends_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(DailyJsonStore::new(dir.path(), "monster_jobs"));

    let mut handles = Vec::new();
    for i in 0..40 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let rec = record(&i.to_string());
            store.append_on(day(), &rec).await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    assert_eq!(read(&store.path_for(day())).len(), 40);
}

#[tokio::test]
async fn corrupted_file_is_backed_up_and_restarted() {
    let dir = tempfile::tempdir().unwrap();
    let store = DailyJsonStore::new(dir.path(), "monster_jobs");
    let path = store.path_for(day());
    std::fs::write(&path, "{not json").unwrap();

    let total = store.append_on(day(), &record("fresh")).await.unwrap();

    assert_eq!(total, 1);
    assert_eq!(
        std::fs::read_to_string(backup_path(&path)).unwrap(),
        "{not json"
    );
    assert_eq!(read(&path)[0]["JobID"], "fresh");
}

#[tokio::test]
async fn corrupted_file_is_left_alone_when_backup_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = DailyJsonStore::new(dir.path(), "monster_jobs");
    let path = store.path_for(day());
    let prior = r#"[{"JobID":"precious"},"#;
    std::fs::write(&path, prior).unwrap();
    std::fs::create_dir(backup_path(&path)).unwrap();

    let err = store.append_on(day(), &record("new")).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Io { .. }), "got {err}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), prior);
}
