//! Employee form state shared by the directory view and the standalone
//! form component.
//!
//! # Design
//! Inputs are held as strings the way a rendered form holds them, so a host
//! can bind text boxes straight to `set`. Conversion to an `Employee` happens
//! once, in `to_employee`, which reports every validation failure at once.
//! A `FieldSet` says which inputs a given form shows; only those are
//! validated, the rest travel with whatever value the form already holds.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::config::NumberingPolicy;
use crate::error::FormError;
use crate::types::Employee;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One editable input of the employee form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    EmpNo,
    Name,
    AddressLine1,
    AddressLine2,
    AddressLine3,
    Department,
    DateOfJoin,
    DateOfBirth,
    BasicSalary,
    Active,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::EmpNo,
        FormField::Name,
        FormField::AddressLine1,
        FormField::AddressLine2,
        FormField::AddressLine3,
        FormField::Department,
        FormField::DateOfJoin,
        FormField::DateOfBirth,
        FormField::BasicSalary,
        FormField::Active,
    ];

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::EmpNo => "Employee No",
            FormField::Name => "Employee Name",
            FormField::AddressLine1 => "Address Line 1",
            FormField::AddressLine2 => "Address Line 2",
            FormField::AddressLine3 => "Address Line 3",
            FormField::Department => "Department",
            FormField::DateOfJoin => "Date of join",
            FormField::DateOfBirth => "Date of birth",
            FormField::BasicSalary => "Basic Salary",
            FormField::Active => "Active",
        }
    }
}

/// The inputs a form renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<FormField>);

impl FieldSet {
    pub fn full() -> Self {
        FormField::ALL.into_iter().collect()
    }

    /// Name and department only.
    pub fn minimal() -> Self {
        [FormField::Name, FormField::Department].into_iter().collect()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().copied()
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::full()
    }
}

impl FromIterator<FormField> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Today's date in the form's input format.
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Cut an API date down to `YYYY-MM-DD`. `2023-01-15T00:00:00` and
/// `2023-01-15 00:00:00` both become `2023-01-15`.
pub fn date_only(value: &str) -> String {
    value
        .trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub emp_no: String,
    pub emp_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub department_code: String,
    pub date_of_join: String,
    pub date_of_birth: String,
    pub basic_salary: String,
    pub is_active: bool,
    /// The record the form was filled from, if any.
    loaded: Option<Employee>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            emp_no: String::new(),
            emp_name: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            address_line3: String::new(),
            department_code: String::new(),
            date_of_join: today(),
            date_of_birth: String::new(),
            basic_salary: String::new(),
            is_active: true,
            loaded: None,
        }
    }
}

impl EmployeeForm {
    /// Fill the form from an existing record for editing. The employee
    /// number is carried along but can no longer be changed.
    pub fn from_employee(employee: &Employee) -> Self {
        let date = |value: &Option<String>| value.as_deref().map(date_only).unwrap_or_default();
        Self {
            emp_no: employee.emp_no.clone(),
            emp_name: employee.emp_name.clone(),
            address_line1: employee.emp_address_line1.clone().unwrap_or_default(),
            address_line2: employee.emp_address_line2.clone().unwrap_or_default(),
            address_line3: employee.emp_address_line3.clone().unwrap_or_default(),
            department_code: employee.department_code.clone(),
            date_of_join: date(&employee.date_of_join),
            date_of_birth: date(&employee.date_of_birth),
            basic_salary: employee.basic_salary.to_string(),
            is_active: employee.is_active,
            loaded: Some(employee.clone()),
        }
    }

    pub fn is_existing(&self) -> bool {
        self.loaded.is_some()
    }

    /// Apply a change event. Returns false when the input is read only.
    /// `Active` accepts `true`/`on`/`1` as checked.
    pub fn set(&mut self, field: FormField, value: &str) -> bool {
        let slot = match field {
            FormField::EmpNo if self.loaded.is_some() => return false,
            FormField::EmpNo => &mut self.emp_no,
            FormField::Name => &mut self.emp_name,
            FormField::AddressLine1 => &mut self.address_line1,
            FormField::AddressLine2 => &mut self.address_line2,
            FormField::AddressLine3 => &mut self.address_line3,
            FormField::Department => &mut self.department_code,
            FormField::DateOfJoin => &mut self.date_of_join,
            FormField::DateOfBirth => &mut self.date_of_birth,
            FormField::BasicSalary => &mut self.basic_salary,
            FormField::Active => {
                self.is_active = matches!(value.trim(), "true" | "on" | "1");
                return true;
            }
        };
        *slot = value.to_string();
        true
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::EmpNo => self.emp_no.clone(),
            FormField::Name => self.emp_name.clone(),
            FormField::AddressLine1 => self.address_line1.clone(),
            FormField::AddressLine2 => self.address_line2.clone(),
            FormField::AddressLine3 => self.address_line3.clone(),
            FormField::Department => self.department_code.clone(),
            FormField::DateOfJoin => self.date_of_join.clone(),
            FormField::DateOfBirth => self.date_of_birth.clone(),
            FormField::BasicSalary => self.basic_salary.clone(),
            FormField::Active => self.is_active.to_string(),
        }
    }

    /// Validate the inputs in `fields` and build the record to submit.
    ///
    /// Name and department are always required. A new record with a blank
    /// number gets one according to `numbering`. A hidden input that does
    /// not parse keeps the loaded record's value.
    pub fn to_employee(&self, fields: &FieldSet, numbering: NumberingPolicy) -> Result<Employee, Vec<FormError>> {
        let mut errors = Vec::new();

        let mut emp_no = self.emp_no.trim().to_string();
        if emp_no.is_empty() && self.loaded.is_none() {
            match numbering {
                NumberingPolicy::ClientUuid => emp_no = Uuid::new_v4().to_string(),
                NumberingPolicy::ServerAssigned => {}
                NumberingPolicy::Manual => errors.push(FormError::MissingEmployeeNumber),
            }
        }

        if self.emp_name.trim().is_empty() {
            errors.push(FormError::MissingName);
        }
        if self.department_code.trim().is_empty() {
            errors.push(FormError::MissingDepartment);
        }

        let salary = parse_salary(&self.basic_salary);
        if fields.contains(FormField::BasicSalary) && salary.is_none() {
            errors.push(FormError::InvalidSalary);
        }

        let date_of_join = parse_date(&self.date_of_join);
        if fields.contains(FormField::DateOfJoin) && date_of_join.is_err() {
            errors.push(FormError::InvalidDate {
                field: FormField::DateOfJoin.label(),
            });
        }
        let date_of_birth = parse_date(&self.date_of_birth);
        if fields.contains(FormField::DateOfBirth) && date_of_birth.is_err() {
            errors.push(FormError::InvalidDate {
                field: FormField::DateOfBirth.label(),
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Employee {
            emp_no,
            emp_name: self.emp_name.trim().to_string(),
            emp_address_line1: non_empty(&self.address_line1),
            emp_address_line2: non_empty(&self.address_line2),
            emp_address_line3: non_empty(&self.address_line3),
            department_code: self.department_code.trim().to_string(),
            date_of_join: date_of_join
                .unwrap_or_else(|_| self.loaded.as_ref().and_then(|e| e.date_of_join.clone())),
            date_of_birth: date_of_birth
                .unwrap_or_else(|_| self.loaded.as_ref().and_then(|e| e.date_of_birth.clone())),
            basic_salary: salary
                .or_else(|| self.loaded.as_ref().map(|e| e.basic_salary))
                .unwrap_or_default(),
            is_active: self.is_active,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_salary(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|salary| salary.is_finite() && *salary > 0.0)
}

/// Blank is `Ok(None)`; anything else must be a calendar date.
fn parse_date(value: &str) -> Result<Option<String>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map(|date| Some(date.format(DATE_FORMAT).to_string()))
}
