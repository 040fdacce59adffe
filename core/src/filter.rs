//! Client-side search over the canonical employee collection.

use crate::types::Employee;

/// True when `term` occurs in the employee's name or department code,
/// ignoring case. The empty term matches every record.
pub fn matches(employee: &Employee, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    employee.emp_name.to_lowercase().contains(&needle)
        || employee.department_code.to_lowercase().contains(&needle)
}

/// The displayed subset, in canonical order.
pub fn filter_employees<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    employees.iter().filter(|e| matches(e, term)).collect()
}
