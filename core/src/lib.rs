//! Client core for the employee management API.
//!
//! # Overview
//! Everything an employee directory front-end needs short of drawing
//! pixels: typed DTOs, a request builder / response parser, a blocking
//! transport, the directory view model, and a standalone entry form. A host
//! (terminal UI, WASM page, desktop shell) renders the state these types
//! expose and forwards user events back into them.
//!
//! # Design
//! - `EmployeeClient` is stateless and never touches the network; each
//!   operation is a `build_*` / `parse_*` pair.
//! - `Transport` is the only I/O seam. `UreqTransport` is the default.
//! - `EmployeeApi` performs one call per operation, logs failures and
//!   returns them unchanged.
//! - `EmployeeDirectory` and `EmployeeEntry` turn every failure into a
//!   display string and stay usable afterwards.

pub mod api;
pub mod client;
pub mod config;
pub mod directory;
pub mod entry;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
mod fake;

pub use api::EmployeeApi;
pub use client::EmployeeClient;
pub use config::{ClientConfig, DirectoryConfig, NumberingPolicy, SyncPolicy};
pub use directory::{EmployeeDirectory, EmployeeRow, FormMode, ViewState};
pub use entry::{EmployeeEntry, EntryConfig};
pub use error::{ApiError, FormError};
pub use form::{EmployeeForm, FieldSet, FormField};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Department, Employee};
