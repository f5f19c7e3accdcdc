//! Employee admin panel core: session store, employee table engine,
//! dashboard metrics and print export.

pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
pub mod utils;

pub use app::{AdminApp, Reply};
pub use config::AppConfig;
pub use db::{JsonFileStorage, LocalStorage, MemoryStorage};
pub use errors::{AppError, AppResult};
pub use handlers::dashboard::{Dashboard, DashboardMetrics};
pub use handlers::employee::{
    DeleteConfirmation, EmployeeList, FormMode, IdPolicy, PageChange, SubmitOutcome,
};
pub use handlers::print::{render_print_document, FilePrintSink, MemoryPrintSink, PrintColumn, PrintSink};
pub use models::employee::{Employee, Gender, Status};
pub use models::form::{EmployeeForm, ImageUpload};
pub use models::user::User;
pub use store::{SessionStore, SharedStore};
pub use utils::filters::{EmployeeFilter, Facet};
pub use utils::validation::{validate_form, FormErrors, FormField};
