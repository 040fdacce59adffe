//! In-process stand-in for the employee API, used by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::api::EmployeeApi;
use crate::client::EmployeeClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Department, Employee};

pub(crate) const BASE_URL: &str = "http://fake.test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Route {
    Employees,
    Departments,
    Employee,
}

#[derive(Default)]
struct State {
    employees: Vec<Employee>,
    departments: Vec<Department>,
    failing: HashSet<(HttpMethod, Route)>,
    empty_bodies: bool,
    /// Served verbatim for the employee list when set.
    raw_employees: Option<String>,
    write_reply: Option<String>,
    requests: Vec<HttpRequest>,
    next_no: u32,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<State>,
}

pub(crate) fn employee(emp_no: &str, name: &str, department: &str) -> Employee {
    let mut employee = Employee::new(emp_no, name, department);
    employee.basic_salary = 1000.0;
    employee.date_of_join = Some("2020-01-01T00:00:00".to_string());
    employee
}

impl FakeApi {
    pub(crate) fn with_data(departments: Vec<Department>, employees: Vec<Employee>) -> Self {
        Self {
            state: Mutex::new(State {
                employees,
                departments,
                next_no: 100_000,
                ..State::default()
            }),
        }
    }

    pub(crate) fn seeded() -> Self {
        Self::with_data(
            vec![
                Department::new("HR", "Human Resources"),
                Department::new("IT", "Information Technology"),
            ],
            vec![employee("1", "Alice", "HR"), employee("2", "Bob", "IT")],
        )
    }

    pub(crate) fn api(&self) -> EmployeeApi<&Self> {
        let client = EmployeeClient::new(&ClientConfig::new(BASE_URL, "token")).unwrap();
        EmployeeApi::new(client, self)
    }

    pub(crate) fn fail(&self, method: HttpMethod, route: Route) {
        self.state.lock().unwrap().failing.insert((method, route));
    }

    pub(crate) fn recover(&self) {
        self.state.lock().unwrap().failing.clear();
    }

    /// Acknowledge writes with empty bodies instead of echoing the record.
    pub(crate) fn empty_bodies(&self) {
        self.state.lock().unwrap().empty_bodies = true;
    }

    /// Serve this exact JSON for the employee list.
    pub(crate) fn raw_employees(&self, body: &str) {
        self.state.lock().unwrap().raw_employees = Some(body.to_string());
    }

    /// Acknowledge writes with this body instead of echoing the record.
    pub(crate) fn write_reply(&self, body: &str) {
        self.state.lock().unwrap().write_reply = Some(body.to_string());
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn employees(&self) -> Vec<Employee> {
        self.state.lock().unwrap().employees.clone()
    }

    /// Change a record behind the client's back.
    pub(crate) fn insert_remote(&self, employee: Employee) {
        self.state.lock().unwrap().employees.push(employee);
    }
}

fn route(path: &str) -> Option<(Route, Option<String>)> {
    let rest = path.strip_prefix(BASE_URL)?.strip_prefix("/api/v1.0/")?;
    match rest {
        "Employees" => Some((Route::Employees, None)),
        "Departments" => Some((Route::Departments, None)),
        "Employee" => Some((Route::Employee, None)),
        _ => rest
            .strip_prefix("Employee/")
            .map(|emp_no| (Route::Employee, Some(emp_no.to_string()))),
    }
}

fn respond(status: u16, body: String) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn json<T: serde::Serialize>(status: u16, value: &T) -> HttpResponse {
    respond(status, serde_json::to_string(value).unwrap())
}

impl Transport for FakeApi {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let Some((route, emp_no)) = route(&request.path) else {
            return Ok(respond(404, String::new()));
        };
        if state.failing.contains(&(request.method, route)) {
            return Ok(respond(500, "simulated failure".to_string()));
        }

        let body: Option<Employee> = request
            .body
            .as_deref()
            .map(|b| serde_json::from_str(b).unwrap());

        let response = match (request.method, route, emp_no) {
            (HttpMethod::Get, Route::Employees, _) => match &state.raw_employees {
                Some(raw) => respond(200, raw.clone()),
                None => json(200, &state.employees),
            },
            (HttpMethod::Get, Route::Departments, _) => json(200, &state.departments),
            (HttpMethod::Get, Route::Employee, Some(no)) => {
                match state.employees.iter().find(|e| e.emp_no == no) {
                    Some(found) => json(200, found),
                    None => respond(404, String::new()),
                }
            }
            (HttpMethod::Post, Route::Employee, None) => {
                let mut created = body.unwrap();
                if created.emp_no.is_empty() {
                    state.next_no += 1;
                    created.emp_no = format!("{:06}", state.next_no);
                }
                state.employees.push(created.clone());
                if let Some(reply) = &state.write_reply {
                    respond(200, reply.clone())
                } else if state.empty_bodies {
                    respond(200, String::new())
                } else {
                    json(201, &created)
                }
            }
            (HttpMethod::Put, Route::Employee, None) => {
                let updated = body.unwrap();
                let empty = state.empty_bodies;
                match state.employees.iter_mut().find(|e| e.emp_no == updated.emp_no) {
                    Some(slot) => {
                        *slot = updated.clone();
                        if empty {
                            respond(200, String::new())
                        } else {
                            json(200, &updated)
                        }
                    }
                    None => respond(404, String::new()),
                }
            }
            (HttpMethod::Delete, Route::Employee, Some(no)) => {
                let before = state.employees.len();
                state.employees.retain(|e| e.emp_no != no);
                if state.employees.len() < before {
                    respond(204, String::new())
                } else {
                    respond(404, String::new())
                }
            }
            _ => respond(405, String::new()),
        };
        Ok(response)
    }
}
