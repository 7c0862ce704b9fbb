use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(rename = "jobSearchResponse")]
    pub job_search_response: Option<SearchPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub data: Option<Vec<SearchResultItem>>,
}

/// One summary row of a search page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResultItem {
    #[serde(deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub employment_types: Vec<String>,
    pub created_at: Option<i64>,
    pub redirect_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_estimated_salary: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailEnvelope {
    /// Kept raw so an empty object can be told apart from a sparse detail.
    #[serde(rename = "jobDetailResponse")]
    pub job_detail_response: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,
    pub description: Option<String>,
    pub company: Option<Company>,
    pub minimum_salary: Option<SalaryValue>,
    pub maximum_salary: Option<SalaryValue>,
    pub minimum_experience: Option<ExperienceValue>,
    pub apply_url: Option<String>,
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

impl Location {
    pub fn is_blank(&self) -> bool {
        self.city.is_empty() && self.state.is_empty() && self.country.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryValue {
    pub absolute_value: Option<Number>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceValue {
    pub years: Option<Number>,
}

/// The flat record written to the daily output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJobRecord {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "PostUrl")]
    pub post_url: String,
    #[serde(rename = "JobID")]
    pub job_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Speciality")]
    pub speciality: String,
    #[serde(rename = "JobType")]
    pub job_type: String,
    #[serde(rename = "JobDetails")]
    pub job_details: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "PostedOn")]
    pub posted_on: String,
    #[serde(rename = "SalaryFrom")]
    pub salary_from: Number,
    #[serde(rename = "SalaryUpto")]
    pub salary_to: Number,
    #[serde(rename = "PayoutTerm")]
    pub payout_term: String,
    #[serde(rename = "IsEstimatedSalary")]
    pub is_estimated_salary: bool,
    #[serde(rename = "ScrapedOn")]
    pub scraped_on: String,
    #[serde(rename = "Experience")]
    pub experience: Option<Number>,
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(Number),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        Some(Raw::Str(s)) => s,
        Some(Raw::Num(n)) => n.to_string(),
        None => String::new(),
    })
}
