//! The employee directory view: canonical collections, search, and the
//! create/edit form, driven through the employee API.
//!
//! # Design
//! All UI state lives in one `ViewState` value instead of independent
//! editing/error flags, so a banner can never coexist with a stale edit
//! target. The displayed list is never stored; `displayed` derives it from
//! the canonical collection and the search term on every call, so searches
//! and mutations cannot leave the two out of step.

use std::thread;

use tracing::{info, warn};

use crate::api::EmployeeApi;
use crate::config::{ClientConfig, DirectoryConfig, SyncPolicy};
use crate::error::{describe_form_errors, ApiError};
use crate::filter::filter_employees;
use crate::form::{EmployeeForm, FieldSet, FormField};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Department, Employee};

pub const EMPLOYEES_LOAD_ERROR: &str = "Error fetching employees";
pub const DEPARTMENTS_LOAD_ERROR: &str = "Error fetching departments";

/// What a submit of the form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { emp_no: String },
}

impl FormMode {
    fn into_state(self) -> ViewState {
        match self {
            FormMode::Create => ViewState::Idle,
            FormMode::Edit { emp_no } => ViewState::Editing { emp_no },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// The initial load has not finished.
    Loading,
    /// Ready; the form creates a new record.
    Idle,
    /// The form holds the record with this number.
    Editing { emp_no: String },
    /// A banner is shown. `mode` is what the form returns to.
    Error { message: String, mode: FormMode },
}

impl ViewState {
    pub fn mode(&self) -> FormMode {
        match self {
            ViewState::Loading | ViewState::Idle => FormMode::Create,
            ViewState::Editing { emp_no } => FormMode::Edit {
                emp_no: emp_no.clone(),
            },
            ViewState::Error { mode, .. } => mode.clone(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// One table row as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub emp_no: String,
    pub emp_name: String,
    pub department_code: String,
    /// Blank when the code is not among the loaded departments.
    pub department_name: String,
}

pub struct EmployeeDirectory<T> {
    api: EmployeeApi<T>,
    config: DirectoryConfig,
    fields: FieldSet,
    employees: Vec<Employee>,
    departments: Vec<Department>,
    search_term: String,
    form: EmployeeForm,
    state: ViewState,
}

impl EmployeeDirectory<UreqTransport> {
    pub fn connect(client: &ClientConfig, config: DirectoryConfig) -> Result<Self, ApiError> {
        Ok(Self::new(EmployeeApi::connect(client)?, config))
    }
}

impl<T: Transport> EmployeeDirectory<T> {
    pub fn new(api: EmployeeApi<T>, config: DirectoryConfig) -> Self {
        Self {
            api,
            config,
            fields: FieldSet::full(),
            employees: Vec::new(),
            departments: Vec::new(),
            search_term: String::new(),
            form: EmployeeForm::default(),
            state: ViewState::Loading,
        }
    }

    /// Restrict the form to `fields`; only those inputs are validated.
    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    pub fn api(&self) -> &EmployeeApi<T> {
        &self.api
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> FormMode {
        self.state.mode()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Fetch employees and departments concurrently. Either may finish
    /// first; a failed fetch leaves its collection as it was.
    pub fn load(&mut self) -> bool {
        let mode = self.state.mode();
        self.state = ViewState::Loading;

        let api = &self.api;
        let (employees, departments) = thread::scope(|s| {
            let employees = s.spawn(|| api.list_employees());
            let departments = s.spawn(|| api.list_departments());
            (
                employees.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
                departments.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
            )
        });

        let mut failures = Vec::new();
        match employees {
            Ok(list) => self.employees = list,
            Err(_) => failures.push(EMPLOYEES_LOAD_ERROR),
        }
        match departments {
            Ok(list) => self.departments = list,
            Err(_) => failures.push(DEPARTMENTS_LOAD_ERROR),
        }

        if failures.is_empty() {
            info!(
                employees = self.employees.len(),
                departments = self.departments.len(),
                "directory loaded"
            );
            self.state = mode.into_state();
            true
        } else {
            self.fail(failures.join("; "), mode);
            false
        }
    }

    /// Update the search term. The canonical collection is untouched.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Employees matching the search term, in canonical order.
    pub fn displayed(&self) -> Vec<&Employee> {
        filter_employees(&self.employees, &self.search_term)
    }

    pub fn rows(&self) -> Vec<EmployeeRow> {
        self.displayed()
            .into_iter()
            .map(|e| EmployeeRow {
                emp_no: e.emp_no.clone(),
                emp_name: e.emp_name.clone(),
                department_code: e.department_code.clone(),
                department_name: self.department_name(&e.department_code).to_string(),
            })
            .collect()
    }

    /// Name of the department with `code`, or `""` when it is unknown.
    pub fn department_name(&self, code: &str) -> &str {
        self.departments
            .iter()
            .find(|d| d.code == code)
            .map(|d| d.name.as_str())
            .unwrap_or_default()
    }

    /// Apply a change to one form input.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        self.form.set(field, value)
    }

    /// Copy the record with `emp_no` into the form and switch to edit mode.
    /// Unknown numbers are ignored.
    pub fn edit(&mut self, emp_no: &str) -> bool {
        let Some(employee) = self.employees.iter().find(|e| e.emp_no == emp_no) else {
            return false;
        };
        self.form = EmployeeForm::from_employee(employee);
        self.state = ViewState::Editing {
            emp_no: emp_no.to_string(),
        };
        true
    }

    /// Drop the form contents and go back to create mode.
    pub fn cancel(&mut self) {
        self.form = EmployeeForm::default();
        self.state = ViewState::Idle;
    }

    pub fn dismiss_error(&mut self) {
        if let ViewState::Error { mode, .. } = &self.state {
            self.state = mode.clone().into_state();
        }
    }

    /// Validate and save the form: create in create mode, update in edit
    /// mode. Returns true when the API accepted the record.
    pub fn submit(&mut self) -> bool {
        let mode = self.state.mode();
        let employee = match self.form.to_employee(&self.fields, self.config.numbering) {
            Ok(employee) => employee,
            Err(errors) => {
                warn!(count = errors.len(), "employee form rejected");
                self.fail(describe_form_errors(&errors), mode);
                return false;
            }
        };

        match mode {
            FormMode::Create => match self.api.create_employee(&employee) {
                Ok(created) => {
                    let record = created.unwrap_or(employee);
                    info!(emp_no = %record.emp_no, "employee created");
                    self.reset_form();
                    if self.config.sync == SyncPolicy::Refetch || record.emp_no.is_empty() {
                        self.refetch();
                    } else {
                        self.employees.push(record);
                    }
                    true
                }
                Err(e) => {
                    self.fail(format!("Error adding employee: {e}"), FormMode::Create);
                    false
                }
            },
            FormMode::Edit { emp_no } => match self.api.update_employee(&employee) {
                Ok(updated) => {
                    let record = updated.unwrap_or(employee);
                    info!(emp_no = %record.emp_no, "employee updated");
                    self.reset_form();
                    if self.config.sync == SyncPolicy::Refetch {
                        self.refetch();
                    } else if let Some(slot) = self.employees.iter_mut().find(|e| e.emp_no == emp_no) {
                        *slot = record;
                    }
                    true
                }
                Err(e) => {
                    self.fail(format!("Error updating employee: {e}"), FormMode::Edit { emp_no });
                    false
                }
            },
        }
    }

    /// Delete the record on the API, then drop it locally.
    pub fn delete(&mut self, emp_no: &str) -> bool {
        let mode = self.state.mode();
        if let Err(e) = self.api.delete_employee(emp_no) {
            self.fail(format!("Error deleting employee: {e}"), mode);
            return false;
        }
        info!(emp_no, "employee deleted");

        let mode = match mode {
            FormMode::Edit { emp_no: editing } if editing == emp_no => {
                self.form = EmployeeForm::default();
                FormMode::Create
            }
            other => other,
        };
        self.state = mode.into_state();

        if self.config.sync == SyncPolicy::Refetch {
            self.refetch();
        } else {
            self.employees.retain(|e| e.emp_no != emp_no);
        }
        true
    }

    fn reset_form(&mut self) {
        self.form = EmployeeForm::default();
        self.state = ViewState::Idle;
    }

    /// Replace the employee list with the API's; on failure keep it and
    /// raise the fetch banner.
    fn refetch(&mut self) {
        match self.api.list_employees() {
            Ok(list) => self.employees = list,
            Err(_) => {
                let mode = self.state.mode();
                self.fail(EMPLOYEES_LOAD_ERROR.to_string(), mode);
            }
        }
    }

    fn fail(&mut self, message: String, mode: FormMode) {
        self.state = ViewState::Error { message, mode };
    }
}
