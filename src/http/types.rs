use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Attach the configured board headers. Availability checks go out bare.
    pub api_headers: bool,
}

impl HttpRequest {
    pub fn api(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            api_headers: true,
        }
    }

    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            api_headers: false,
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
