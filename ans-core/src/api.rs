//! API envelope models
//!
//! Every ANS API response wraps its payload in `data`; list responses add
//! pagination metadata and failures carry an `errors` array.

use serde::{Deserialize, Serialize};

/// Successful response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::default(),
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            data,
            meta: ResponseMeta {
                pagination: Some(pagination),
                location: None,
            },
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Page metadata of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u32,
    pub count: u32,
    pub per_page: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// Body of a create call: the new resource's identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResource {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Flatten every reported error into one line.
    pub fn describe(&self) -> String {
        if self.errors.is_empty() {
            return self.message.clone().unwrap_or_default();
        }
        self.errors
            .iter()
            .map(ApiError::describe)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One entry of an error body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ApiError {
    pub fn describe(&self) -> String {
        let mut text = match (self.title.is_empty(), self.detail.is_empty()) {
            (false, false) => format!("{}: {}", self.title, self.detail),
            (false, true) => self.title.clone(),
            (true, _) => self.detail.clone(),
        };
        if let Some(source) = &self.source {
            text.push_str(&format!(" (source: {})", source));
        }
        text
    }
}

/// Some endpoints return numeric identifiers; everything downstream treats ids as strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
