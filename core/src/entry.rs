//! Standalone employee form, usable on its own or beside the directory.
//!
//! It loads its own department options and tells its owner about saved
//! records through a callback, so an external list can refresh itself.

use std::fmt;

use tracing::info;

use crate::api::EmployeeApi;
use crate::config::NumberingPolicy;
use crate::directory::DEPARTMENTS_LOAD_ERROR;
use crate::error::describe_form_errors;
use crate::form::{EmployeeForm, FieldSet, FormField};
use crate::transport::Transport;
use crate::types::{Department, Employee};

pub const EMPLOYEE_LOAD_ERROR: &str = "Error fetching employee";

pub type SuccessCallback = Box<dyn FnMut(&Employee) + Send>;

pub struct EntryConfig {
    pub fields: FieldSet,
    pub numbering: NumberingPolicy,
    pub on_success: SuccessCallback,
}

impl EntryConfig {
    pub fn new(fields: FieldSet, on_success: impl FnMut(&Employee) + Send + 'static) -> Self {
        Self {
            fields,
            numbering: NumberingPolicy::default(),
            on_success: Box::new(on_success),
        }
    }

    pub fn with_numbering(mut self, numbering: NumberingPolicy) -> Self {
        self.numbering = numbering;
        self
    }
}

impl fmt::Debug for EntryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryConfig")
            .field("fields", &self.fields)
            .field("numbering", &self.numbering)
            .finish_non_exhaustive()
    }
}

pub struct EmployeeEntry<T> {
    api: EmployeeApi<T>,
    config: EntryConfig,
    /// `Some` in edit mode: the record this form updates.
    target: Option<String>,
    form: EmployeeForm,
    departments: Vec<Department>,
    error: Option<String>,
}

impl<T: Transport> EmployeeEntry<T> {
    /// A form that always creates new records.
    pub fn create(api: EmployeeApi<T>, config: EntryConfig) -> Self {
        Self {
            api,
            config,
            target: None,
            form: EmployeeForm::default(),
            departments: Vec::new(),
            error: None,
        }
    }

    /// A form that updates the record with `emp_no`, loaded by `mount`.
    pub fn edit(api: EmployeeApi<T>, config: EntryConfig, emp_no: &str) -> Self {
        Self {
            target: Some(emp_no.to_string()),
            ..Self::create(api, config)
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn fields(&self) -> &FieldSet {
        &self.config.fields
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load department options and, in edit mode, the record itself.
    pub fn mount(&mut self) -> bool {
        let mut failures = Vec::new();

        match self.api.list_departments() {
            Ok(list) => self.departments = list,
            Err(_) => failures.push(DEPARTMENTS_LOAD_ERROR),
        }
        if let Some(emp_no) = &self.target {
            match self.api.get_employee(emp_no) {
                Ok(employee) => self.form = EmployeeForm::from_employee(&employee),
                Err(_) => failures.push(EMPLOYEE_LOAD_ERROR),
            }
        }

        if failures.is_empty() {
            self.error = None;
            true
        } else {
            self.error = Some(failures.join("; "));
            false
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) -> bool {
        self.form.set(field, value)
    }

    /// Discard edits: blank for a create form, empty until re-mounted for
    /// an edit form.
    pub fn reset(&mut self) {
        self.form = EmployeeForm::default();
        self.error = None;
    }

    /// Save the form and notify the owner. Returns true on success.
    pub fn submit(&mut self) -> bool {
        if self.target.is_some() && !self.form.is_existing() {
            self.error = Some(EMPLOYEE_LOAD_ERROR.to_string());
            return false;
        }

        let employee = match self.form.to_employee(&self.config.fields, self.config.numbering) {
            Ok(employee) => employee,
            Err(errors) => {
                self.error = Some(describe_form_errors(&errors));
                return false;
            }
        };

        let saved = match &self.target {
            None => self
                .api
                .create_employee(&employee)
                .map_err(|e| format!("Error adding employee: {e}")),
            Some(_) => self
                .api
                .update_employee(&employee)
                .map_err(|e| format!("Error updating employee: {e}")),
        };

        match saved {
            Ok(record) => {
                let record = record.unwrap_or(employee);
                info!(emp_no = %record.emp_no, edit = self.target.is_some(), "employee saved from form");
                (self.config.on_success)(&record);
                self.error = None;
                self.form = match self.target {
                    Some(_) => EmployeeForm::from_employee(&record),
                    None => EmployeeForm::default(),
                };
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }
}
