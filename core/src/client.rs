//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds the parsed base URL and the API token and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The transport executes the round-trip in
//! between, keeping this module deterministic.

use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Department, Employee};

pub const TOKEN_HEADER: &str = "apiToken";

const EMPLOYEES: &[&str] = &["api", "v1.0", "Employees"];
const DEPARTMENTS: &[&str] = &["api", "v1.0", "Departments"];
const EMPLOYEE: &[&str] = &["api", "v1.0", "Employee"];

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base: Url,
    api_token: String,
}

impl EmployeeClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }
        Ok(Self {
            base,
            api_token: config.api_token.clone(),
        })
    }

    pub fn build_list_employees(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.endpoint(EMPLOYEES, None), None)
    }

    pub fn build_list_departments(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.endpoint(DEPARTMENTS, None), None)
    }

    pub fn build_get_employee(&self, emp_no: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.endpoint(EMPLOYEE, Some(emp_no)), None)
    }

    pub fn build_create_employee(&self, employee: &Employee) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(employee).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, self.endpoint(EMPLOYEE, None), Some(body)))
    }

    /// The record travels whole; the API keys the update on its `empNo`.
    pub fn build_update_employee(&self, employee: &Employee) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(employee).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, self.endpoint(EMPLOYEE, None), Some(body)))
    }

    pub fn build_delete_employee(&self, emp_no: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.endpoint(EMPLOYEE, Some(emp_no)), None)
    }

    pub fn parse_list_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    pub fn parse_list_departments(&self, response: HttpResponse) -> Result<Vec<Department>, ApiError> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    pub fn parse_get_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response)?;
        parse_body(&response.body)
    }

    /// Returns `None` when the API acknowledges the create with an empty body.
    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<Option<Employee>, ApiError> {
        check_status(&response)?;
        parse_optional_body(&response.body)
    }

    /// Returns `None` when the API acknowledges the update with an empty body.
    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<Option<Employee>, ApiError> {
        check_status(&response)?;
        parse_optional_body(&response.body)
    }

    pub fn parse_delete_employee(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str], emp_no: Option<&str>) -> String {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).extend(emp_no);
        }
        url.into()
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (TOKEN_HEADER.to_string(), self.api_token.clone()),
            ],
            body,
        }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Write acknowledgements: the status decides success, the body is only
/// used when it is the saved record.
fn parse_optional_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match parse_body(body) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!(error = %e, "write acknowledged with an unrecognised body");
            Ok(None)
        }
    }
}
