//! Domain DTOs for the employee API.
//!
//! # Design
//! Field names follow the API's camelCase JSON. The types are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift between the two. Dates stay as the wire strings because the API
//! answers with either `YYYY-MM-DD` or a full timestamp; the form layer
//! normalizes them.

use serde::{Deserialize, Deserializer, Serialize};

/// A single employee record as exchanged with the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Identity key. Empty when the server is expected to assign it.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub emp_no: String,
    pub emp_name: String,
    #[serde(default)]
    pub emp_address_line1: Option<String>,
    #[serde(default)]
    pub emp_address_line2: Option<String>,
    #[serde(default)]
    pub emp_address_line3: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department_code: String,
    #[serde(default)]
    pub date_of_join: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic_salary: f64,
    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// `null` reads like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_active))
}

impl Employee {
    /// A minimal active record, mostly useful to hosts and tests.
    pub fn new(emp_no: &str, emp_name: &str, department_code: &str) -> Self {
        Self {
            emp_no: emp_no.to_string(),
            emp_name: emp_name.to_string(),
            emp_address_line1: None,
            emp_address_line2: None,
            emp_address_line3: None,
            department_code: department_code.to_string(),
            date_of_join: None,
            date_of_birth: None,
            basic_salary: 0.0,
            is_active: true,
        }
    }
}

/// A department employees are tagged with. Read only from this client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    #[serde(alias = "departmentCode")]
    pub code: String,
    #[serde(alias = "departmentName")]
    pub name: String,
}

impl Department {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}
