//! Mock record model, management DTOs, and the resolved response shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

/// HTTP methods a mock can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "http_method", rename_all = "UPPERCASE")]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Connect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; anything outside the enumeration is a bad request.
impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| AppError::Validation(format!("Unsupported HTTP method '{token}'")))
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// A stored canned response for one `(path, method)` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Mock {
    pub id: Uuid,
    pub filter_name: String,
    pub description: String,
    pub path: String,
    pub method: HttpMethod,
    pub status_code: i32,
    pub body: Option<serde_json::Value>,
    pub is_pdf: bool,
    pub is_active: bool,
    pub create_date: DateTime<Utc>,
}

impl Mock {
    pub fn endpoint(&self) -> (&str, HttpMethod) {
        (&self.path, self.method)
    }
}

/// Fields overwritten by an edit. `id` and `filter_name` are never touched.
#[derive(Debug, Clone)]
pub struct MockFields {
    pub description: String,
    pub path: String,
    pub method: HttpMethod,
    pub status_code: i32,
    pub body: Option<serde_json::Value>,
    pub is_pdf: bool,
    pub is_active: bool,
    pub create_date: DateTime<Utc>,
}

/// Request body for creating a mock.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMock {
    #[validate(length(min = 1, message = "filter_name is required"))]
    pub filter_name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "path is required"))]
    pub path: String,
    pub method: HttpMethod,
    #[validate(range(min = 200, max = 599, message = "status_code must be 200-599"))]
    pub status_code: u16,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
    #[serde(default)]
    pub is_pdf: bool,
}

impl CreateMock {
    /// Field validation plus the structured-body rule.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        match &self.body {
            None | Some(serde_json::Value::Object(_)) | Some(serde_json::Value::Array(_)) => {
                Ok(())
            }
            Some(_) => Err(AppError::Validation(
                "body must be a JSON object or array".to_string(),
            )),
        }
    }
}

/// Request body for editing a mock in place.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EditMock {
    pub id: Uuid,
    #[serde(flatten)]
    #[validate(nested)]
    pub mock: CreateMock,
}

/// Query string carrying a mock id (`?id=`).
#[derive(Debug, Clone, Deserialize)]
pub struct MockIdQuery {
    pub id: Uuid,
}

/// Query string carrying a filter name (`?name=`).
#[derive(Debug, Clone, Deserialize)]
pub struct FilterNameQuery {
    pub name: String,
}

/// Mock as shown in filter listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockView {
    pub id: Uuid,
    pub filter_name: String,
    pub is_pdf: bool,
    pub description: String,
    pub is_active: bool,
    pub body: Option<serde_json::Value>,
    pub status_code: i32,
    pub path: String,
    pub domain: String,
    pub method: HttpMethod,
}

impl MockView {
    pub fn from_mock(mock: Mock, domain: &str) -> Self {
        Self {
            id: mock.id,
            filter_name: mock.filter_name,
            is_pdf: mock.is_pdf,
            description: mock.description,
            is_active: mock.is_active,
            body: mock.body,
            status_code: mock.status_code,
            path: mock.path,
            domain: domain.to_string(),
            method: mock.method,
        }
    }
}

/// One row of the filter summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSummary {
    pub filter_name: String,
    pub count: usize,
    pub last_create_date: DateTime<Utc>,
}

/// What an inbound request resolves to. Variant order is the priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    /// Serve the bundled PDF resource.
    Pdf { status: u16 },
    /// Serve a structured JSON payload.
    Json {
        status: u16,
        body: serde_json::Value,
    },
    /// Status code with an empty body.
    StatusOnly { status: u16 },
}

impl MockResponse {
    pub fn status(&self) -> u16 {
        match self {
            MockResponse::Pdf { status }
            | MockResponse::Json { status, .. }
            | MockResponse::StatusOnly { status } => *status,
        }
    }
}
