//! The employee API client: one HTTP call per operation.
//!
//! `EmployeeApi` glues the stateless `EmployeeClient` to a `Transport`.
//! Failures are logged and handed back unchanged; there are no retries,
//! timeouts or backoff at this layer.

use tracing::error;

use crate::client::EmployeeClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Department, Employee};

#[derive(Debug, Clone)]
pub struct EmployeeApi<T> {
    client: EmployeeClient,
    transport: T,
}

impl EmployeeApi<UreqTransport> {
    /// Client over a blocking `ureq` transport.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(EmployeeClient::new(config)?, UreqTransport::new()))
    }
}

impl<T: Transport> EmployeeApi<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.call("list employees", Ok(self.client.build_list_employees()), |c, r| {
            c.parse_list_employees(r)
        })
    }

    pub fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.call("list departments", Ok(self.client.build_list_departments()), |c, r| {
            c.parse_list_departments(r)
        })
    }

    pub fn get_employee(&self, emp_no: &str) -> Result<Employee, ApiError> {
        self.call("get employee", Ok(self.client.build_get_employee(emp_no)), |c, r| {
            c.parse_get_employee(r)
        })
    }

    pub fn create_employee(&self, employee: &Employee) -> Result<Option<Employee>, ApiError> {
        self.call("create employee", self.client.build_create_employee(employee), |c, r| {
            c.parse_create_employee(r)
        })
    }

    pub fn update_employee(&self, employee: &Employee) -> Result<Option<Employee>, ApiError> {
        self.call("update employee", self.client.build_update_employee(employee), |c, r| {
            c.parse_update_employee(r)
        })
    }

    pub fn delete_employee(&self, emp_no: &str) -> Result<(), ApiError> {
        self.call("delete employee", Ok(self.client.build_delete_employee(emp_no)), |c, r| {
            c.parse_delete_employee(r)
        })
    }

    fn call<R>(
        &self,
        operation: &'static str,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&EmployeeClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let result = request
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| parse(&self.client, response));
        if let Err(e) = &result {
            error!(operation, error = %e, "employee API call failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeApi, Route};
    use crate::http::HttpMethod;

    #[test]
    fn list_employees_goes_through_transport() {
        let fake = FakeApi::seeded();
        let api = fake.api();
        let employees = api.list_employees().unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(fake.request_count(), 1);
    }

    #[test]
    fn failures_propagate_unchanged() {
        let fake = FakeApi::seeded();
        fake.fail(HttpMethod::Get, Route::Departments);
        let err = fake.api().list_departments().unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn get_missing_employee_is_not_found() {
        let fake = FakeApi::seeded();
        let err = fake.api().get_employee("999999").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn delete_sends_one_request() {
        let fake = FakeApi::seeded();
        fake.api().delete_employee("1").unwrap();
        assert_eq!(fake.request_count(), 1);
        assert_eq!(fake.employees().len(), 1);
    }
}
