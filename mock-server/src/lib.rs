//! In-memory stand-in for the employee management API.
//!
//! Serves the same six endpoints as the hosted API, guarded by the
//! `apiToken` header. Dates are echoed in the API's timestamp form so
//! clients exercise their date normalization.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub const TOKEN_HEADER: &str = "apitoken";
pub const DEFAULT_TOKEN: &str = "test-token";

const FIRST_EMPLOYEE_NO: u32 = 100_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub emp_no: String,
    pub emp_name: String,
    #[serde(default)]
    pub emp_address_line1: Option<String>,
    #[serde(default)]
    pub emp_address_line2: Option<String>,
    #[serde(default)]
    pub emp_address_line3: Option<String>,
    pub department_code: String,
    #[serde(default)]
    pub date_of_join: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub basic_salary: f64,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub code: String,
    pub name: String,
}

pub fn default_departments() -> Vec<Department> {
    [
        ("HR", "Human Resources"),
        ("IT", "Information Technology"),
        ("FIN", "Finance"),
    ]
    .into_iter()
    .map(|(code, name)| Department {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[derive(Default)]
struct Store {
    employees: Vec<Employee>,
    issued: u32,
}

#[derive(Clone)]
pub struct AppState {
    db: Arc<RwLock<Store>>,
    departments: Arc<Vec<Department>>,
    token: Arc<str>,
}

pub fn app() -> Router {
    app_with(DEFAULT_TOKEN, default_departments())
}

pub fn app_with(token: &str, departments: Vec<Department>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        departments: Arc::new(departments),
        token: Arc::from(token),
    };
    Router::new()
        .route("/api/v1.0/Employees", get(list_employees))
        .route("/api/v1.0/Departments", get(list_departments))
        .route("/api/v1.0/Employee", post(create_employee).put(update_employee))
        .route("/api/v1.0/Employee/{emp_no}", get(get_employee).delete(delete_employee))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, app()).await
}

pub async fn run_with(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock employee API listening");
    }
    axum::serve(listener, app).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if token == Some(&*state.token) {
        Ok(next.run(request).await)
    } else {
        warn!(path = %request.uri().path(), "rejected request without valid apiToken");
        Err(StatusCode::UNAUTHORIZED)
    }
}

/// The hosted API answers with `YYYY-MM-DDT00:00:00`; mimic that.
fn as_timestamp(date: Option<String>) -> Option<String> {
    date.map(|d| if d.len() == 10 { format!("{d}T00:00:00") } else { d })
}

fn stored(mut employee: Employee) -> Employee {
    employee.date_of_join = as_timestamp(employee.date_of_join);
    employee.date_of_birth = as_timestamp(employee.date_of_birth);
    employee
}

async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.db.read().await.employees.clone())
}

async fn list_departments(State(state): State<AppState>) -> Json<Vec<Department>> {
    Json(state.departments.as_ref().clone())
}

async fn get_employee(
    State(state): State<AppState>,
    Path(emp_no): Path<String>,
) -> Result<Json<Employee>, StatusCode> {
    let store = state.db.read().await;
    store
        .employees
        .iter()
        .find(|e| e.emp_no == emp_no)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), StatusCode> {
    let mut store = state.db.write().await;
    let mut employee = stored(input);
    if employee.emp_no.is_empty() {
        store.issued += 1;
        employee.emp_no = format!("{}", FIRST_EMPLOYEE_NO + store.issued);
    } else if store.employees.iter().any(|e| e.emp_no == employee.emp_no) {
        return Err(StatusCode::CONFLICT);
    }
    store.employees.push(employee.clone());
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn update_employee(
    State(state): State<AppState>,
    Json(input): Json<Employee>,
) -> Result<Json<Employee>, StatusCode> {
    if input.emp_no.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.db.write().await;
    let slot = store
        .employees
        .iter_mut()
        .find(|e| e.emp_no == input.emp_no)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = stored(input);
    Ok(Json(slot.clone()))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(emp_no): Path<String>,
) -> StatusCode {
    let mut store = state.db.write().await;
    let before = store.employees.len();
    store.employees.retain(|e| e.emp_no != emp_no);
    if store.employees.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
