use crate::{
    models::{JobDetail, Location, NormalizedJobRecord, SalaryValue, SearchResultItem},
    util::now_rfc3339,
};
use chrono::{Local, TimeZone};
use serde_json::Number;

pub const PAYOUT_TERM: &str = "yearly";

/// First location with any non-empty part, in the order the board sent them.
pub fn pick_location(locations: &[Location]) -> Location {
    locations
        .iter()
        .find(|l| !l.is_blank())
        .cloned()
        .unwrap_or_default()
}

/// Epoch milliseconds rendered as local `YYYY-MM-DD HH:MM:SS`; zero or absent
/// stays empty.
pub fn format_created_at(created_at: Option<i64>) -> String {
    match created_at {
        Some(ms) if ms != 0 => Local
            .timestamp_millis_opt(ms)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRange {
    pub from: Number,
    pub to: Number,
}

pub fn salary_range(detail: &JobDetail) -> SalaryRange {
    fn value(s: &Option<SalaryValue>) -> Number {
        s.as_ref()
            .and_then(|s| s.absolute_value.clone())
            .unwrap_or_else(|| Number::from(0))
    }
    SalaryRange {
        from: value(&detail.minimum_salary),
        to: value(&detail.maximum_salary),
    }
}

/// Apply URL when present, else the search row's redirect URL.
pub fn post_url(item: &SearchResultItem, detail: &JobDetail) -> String {
    detail
        .apply_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .or(item.redirect_url.as_deref())
        .unwrap_or_default()
        .to_string()
}

pub fn build_record(
    domain: &str,
    item: &SearchResultItem,
    detail: &JobDetail,
    description_text: String,
) -> NormalizedJobRecord {
    let location = pick_location(&detail.locations);
    let salary = salary_range(detail);

    NormalizedJobRecord {
        domain: domain.to_string(),
        post_url: post_url(item, detail),
        job_id: item.job_id.clone(),
        title: item.title.clone(),
        city: location.city,
        state: location.state,
        speciality: String::new(),
        job_type: item.employment_types.join(", "),
        job_details: description_text,
        industry: String::new(),
        company: detail
            .company
            .as_ref()
            .and_then(|c| c.name.clone())
            .unwrap_or_default(),
        posted_on: format_created_at(item.created_at),
        salary_from: salary.from,
        salary_to: salary.to,
        payout_term: PAYOUT_TERM.to_string(),
        is_estimated_salary: item.is_estimated_salary,
        scraped_on: now_rfc3339(),
        experience: detail
            .minimum_experience
            .as_ref()
            .and_then(|e| e.years.clone()),
    }
}
