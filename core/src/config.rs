//! Client and view configuration.
//!
//! `ClientConfig` carries the fixed connection settings every request needs.
//! Defaults point at the hosted examination API; `from_env` lets a host
//! redirect the client (for example at the mock server) without code changes.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://examination.24x7retail.com";
pub const DEFAULT_API_TOKEN: &str = "?D(G+KbPeSgVkYp3s6v9y$B&E)H@McQf";

pub const BASE_URL_ENV: &str = "EMPLOYEE_API_BASE_URL";
pub const API_TOKEN_ENV: &str = "EMPLOYEE_API_TOKEN";

/// Connection settings for the employee API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent verbatim in the `apiToken` header of every request.
    #[serde(default = "default_api_token")]
    pub api_token: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_token() -> String {
    DEFAULT_API_TOKEN.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: default_api_token(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_token: api_token.to_string(),
        }
    }

    /// Defaults overridden by `EMPLOYEE_API_BASE_URL` / `EMPLOYEE_API_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup(BASE_URL_ENV).unwrap_or(defaults.base_url),
            api_token: lookup(API_TOKEN_ENV).unwrap_or(defaults.api_token),
        }
    }
}

/// How the directory brings its local collection back in line with the API
/// after a successful mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Patch the local collection with the record the API returned.
    #[default]
    Local,
    /// Re-fetch the whole employee list.
    Refetch,
}

/// Who owns new employee numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingPolicy {
    /// The client generates a UUID when the form leaves the number blank.
    #[default]
    ClientUuid,
    /// The number is sent blank and the API assigns one.
    ServerAssigned,
    /// The user must type the number; a blank number fails validation.
    Manual,
}

/// Behavioural switches for `EmployeeDirectory`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub sync: SyncPolicy,
    #[serde(default)]
    pub numbering: NumberingPolicy,
}
