//! Wiring of the admin panel and its line-oriented command shell.

use std::fmt::Write as _;
use std::fs;

use log::{info, warn};

use crate::config::AppConfig;
use crate::db::seed::{default_roster, load_roster};
use crate::db::{JsonFileStorage, LocalStorage, MemoryStorage};
use crate::errors::{AppError, AppResult};
use crate::handlers::auth;
use crate::handlers::dashboard::Dashboard;
use crate::handlers::employee::{DeleteConfirmation, EmployeeList, FormMode, SubmitOutcome};
use crate::handlers::print::{FilePrintSink, PrintSink};
use crate::models::form::ImageUpload;
use crate::store::{SessionStore, SharedStore};
use crate::utils::filters::Facet;
use crate::utils::format::format_date;
use crate::utils::pagination::PageLink;
use crate::utils::validation::FormField;

pub const HELP: &str = "\
Commands:
  login <email> <password>     sign in
  logout                       sign out and clear stored session
  whoami                       show the signed-in user
  dashboard                    headcount metrics
  list                         show the current page of employees
  search [term]                filter by name, employee ID or state
  status <All|Active|Inactive> filter by status
  gender <All|Male|Female|Other> filter by gender
  page <n> | next | prev       change page
  add | edit <id>              open the employee form
  set <field> <value>          fullName, gender, dob (YYYY-MM-DD), state, status
  image <path> [content-type]  attach a profile image
  noimage                      remove the profile image
  save | cancel                submit or discard the form
  toggle <id>                  flip Active/Inactive
  delete <id> | confirm        delete after confirmation (cancel aborts)
  print                        print the filtered list
  help | quit";

pub enum Reply {
    Text(String),
    Quit,
}

pub struct AdminApp {
    store: SharedStore,
    employees: EmployeeList,
    dashboard: Dashboard,
    printer: Box<dyn PrintSink>,
}

impl AdminApp {
    /// Builds storage, roster, store and views from configuration.
    pub fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let storage: Box<dyn LocalStorage> = match &config.storage_path {
            Some(path) => {
                info!("Using session storage file {}", path.display());
                Box::new(JsonFileStorage::open(path))
            }
            None => Box::new(MemoryStorage::new()),
        };
        let roster = match &config.seed_file {
            Some(path) => load_roster(path)?,
            None => default_roster(),
        };
        let printer = Box::new(FilePrintSink::new(&config.print_dir));
        Ok(Self::new(SessionStore::new(storage, roster), config, printer))
    }

    pub fn new(store: SessionStore, config: &AppConfig, printer: Box<dyn PrintSink>) -> Self {
        let store = store.into_shared();
        let employees = EmployeeList::new(store.clone(), config.id_policy);
        let dashboard = Dashboard::attach(&store);
        AdminApp {
            store,
            employees,
            dashboard,
            printer,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn employees(&self) -> &EmployeeList {
        &self.employees
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Runs one shell command. Errors come back as text, never as panics.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        match command {
            "" => Reply::Text(String::new()),
            "quit" | "exit" => Reply::Quit,
            "help" => Reply::Text(HELP.to_string()),
            "login" => Reply::Text(self.login(rest)),
            _ => {
                if let Err(err) = auth::require_session(&self.store.borrow()) {
                    return Reply::Text(format!("{} (use: login <email> <password>)", err));
                }
                match self.protected(command, rest) {
                    Ok(text) => Reply::Text(text),
                    Err(err) => Reply::Text(err.to_string()),
                }
            }
        }
    }

    fn login(&mut self, rest: &str) -> String {
        let mut parts = rest.split_whitespace();
        let email = parts.next().unwrap_or_default();
        let password = parts.next().unwrap_or_default();
        match auth::login(&mut self.store.borrow_mut(), email, password) {
            Ok(user) => format!("Welcome back, {}", user.name),
            Err(err) => err.to_string(),
        }
    }

    fn protected(&mut self, command: &str, rest: &str) -> AppResult<String> {
        match command {
            "logout" => {
                auth::logout(&mut self.store.borrow_mut());
                self.employees.reset_view();
                Ok("Signed out".to_string())
            }
            "whoami" => {
                let store = self.store.borrow();
                let user = auth::require_session(&store)?;
                Ok(format!("{} <{}> (id {})", user.name, user.email, user.id))
            }
            "dashboard" => Ok(self.render_dashboard()),
            "list" => Ok(self.render_page()),
            "search" => {
                self.employees.set_search_term(rest);
                Ok(self.render_page())
            }
            "status" => {
                let facet = rest.parse::<Facet<_>>().map_err(AppError::Input)?;
                if !self.employees.set_status_filter(facet) {
                    return Ok(format!("No employees with status {}", rest));
                }
                Ok(self.render_page())
            }
            "gender" => {
                let facet = rest.parse::<Facet<_>>().map_err(AppError::Input)?;
                if !self.employees.set_gender_filter(facet) {
                    return Ok(format!("No employees with gender {}", rest));
                }
                Ok(self.render_page())
            }
            "page" | "next" | "prev" => {
                let change = match command {
                    "next" => self.employees.next_page(),
                    "prev" => self.employees.previous_page(),
                    _ => rest.parse().ok().and_then(|page| self.employees.go_to_page(page)),
                };
                match change {
                    Some(_) => Ok(self.render_page()),
                    None => Ok("No such page".to_string()),
                }
            }
            "add" => {
                self.employees.open_add_form();
                Ok(self.render_form())
            }
            "edit" => {
                self.employees.open_edit_form(parse_id(rest)?)?;
                Ok(self.render_form())
            }
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = parse_field(name)?;
                self.employees.set_field(field, value.trim())?;
                Ok(self.render_form())
            }
            "image" => {
                let upload = read_upload(rest)?;
                self.employees.attach_image(&upload)?;
                Ok(format!("Attached {}", upload.file_name))
            }
            "noimage" => {
                self.employees.remove_image()?;
                Ok("Image removed".to_string())
            }
            "save" => match self.employees.submit()? {
                SubmitOutcome::Added(e) => Ok(format!("Added {} {}", e.employee_id, e.full_name)),
                SubmitOutcome::Updated(e) => {
                    Ok(format!("Updated {} {}", e.employee_id, e.full_name))
                }
            },
            "cancel" => {
                if matches!(self.employees.delete_confirmation(), DeleteConfirmation::Armed { .. }) {
                    self.employees.cancel_delete();
                    return Ok("Delete cancelled".to_string());
                }
                self.employees.close_form();
                Ok("Form closed".to_string())
            }
            "toggle" => {
                let id = parse_id(rest)?;
                let status = self
                    .employees
                    .toggle_status(id)
                    .ok_or_else(|| AppError::NotFound(format!("employee {}", id)))?;
                Ok(format!("Employee {} is now {}", id, status))
            }
            "delete" => {
                let id = parse_id(rest)?;
                if !self.employees.request_delete(id) {
                    return Err(AppError::NotFound(format!("employee {}", id)));
                }
                match self.employees.delete_confirmation() {
                    DeleteConfirmation::Armed { full_name, .. } => Ok(format!(
                        "Are you sure you want to delete {}? This action cannot be undone. (confirm/cancel)",
                        full_name
                    )),
                    DeleteConfirmation::Idle => Ok(String::new()),
                }
            }
            "confirm" => match self.employees.confirm_delete() {
                Some(e) => Ok(format!("Deleted {} {}", e.employee_id, e.full_name)),
                None => Ok("Nothing to delete".to_string()),
            },
            "print" => {
                let count = self.employees.print(self.printer.as_mut())?;
                Ok(format!("Sent {} employees to the printer", count))
            }
            other => Ok(format!("Unknown command '{}'. Type help.", other)),
        }
    }

    fn render_dashboard(&self) -> String {
        let mut out = String::new();
        for (title, value) in self.dashboard.metrics().cards() {
            let _ = writeln!(out, "{:>6}  {}", value, title);
        }
        out.trim_end().to_string()
    }

    fn render_page(&self) -> String {
        let page = self.employees.page();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<4} {:<22} {:<8} {:<7} {:<13} {:<18} {}",
            "ID", "Employee", "Code", "Gender", "Born", "State", "Status"
        );
        if page.rows.is_empty() {
            let _ = writeln!(out, "No employees found matching your criteria");
        }
        for e in &page.rows {
            let _ = writeln!(
                out,
                "{:<4} {:<22} {:<8} {:<7} {:<13} {:<18} {}",
                e.id,
                e.full_name,
                e.employee_id,
                e.gender,
                format_date(e.dob),
                e.state,
                e.status
            );
        }
        if let Some(summary) = page.summary() {
            let mut links: Vec<String> = page
                .links()
                .iter()
                .map(|link| match link {
                    PageLink::Number { page, active: true } => format!("[{}]", page),
                    PageLink::Number { page, .. } => page.to_string(),
                    PageLink::Ellipsis => "...".to_string(),
                })
                .collect();
            if page.has_previous() {
                links.insert(0, "< prev".to_string());
            }
            if page.has_next() {
                links.push("next >".to_string());
            }
            let _ = writeln!(out, "{}  |  {}", summary, links.join(" "));
        }
        out.trim_end().to_string()
    }

    fn render_form(&self) -> String {
        let Some(modal) = self.employees.form() else {
            return "No form open".to_string();
        };
        let mut out = String::new();
        let heading = match modal.mode {
            FormMode::Add => "Add New Employee".to_string(),
            FormMode::Edit { id } => format!("Edit Employee {}", id),
        };
        let _ = writeln!(out, "{}", heading);
        let fields = [
            (FormField::FullName, modal.form.full_name.as_str()),
            (FormField::Gender, modal.form.gender.as_str()),
            (FormField::Dob, modal.form.dob.as_str()),
            (FormField::State, modal.form.state.as_str()),
            (FormField::Status, modal.form.status.as_str()),
        ];
        for (field, value) in fields {
            let _ = write!(out, "  {:<9} {}", field.as_str(), value);
            if let Some(error) = modal.errors.get(field) {
                let _ = write!(out, "  <- {}", error);
            }
            out.push('\n');
        }
        let image = if modal.image_preview.is_some() { "attached" } else { "none" };
        let _ = write!(out, "  {:<9} {}", "image", image);
        if let Some(error) = modal.errors.get(FormField::ProfileImage) {
            let _ = write!(out, "  <- {}", error);
        }
        out
    }
}

fn parse_id(raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Input(format!("'{}' is not an employee id", raw.trim())))
}

fn parse_field(name: &str) -> AppResult<FormField> {
    match name {
        "fullName" | "name" => Ok(FormField::FullName),
        "gender" => Ok(FormField::Gender),
        "dob" => Ok(FormField::Dob),
        "state" => Ok(FormField::State),
        "status" => Ok(FormField::Status),
        other => Err(AppError::Input(format!("unknown form field '{}'", other))),
    }
}

fn read_upload(rest: &str) -> AppResult<ImageUpload> {
    let mut parts = rest.split_whitespace();
    let path = parts
        .next()
        .ok_or_else(|| AppError::Input("image path is required".to_string()))?;
    let bytes = fs::read(path).map_err(|err| {
        warn!("Failed to read image {}: {}", path, err);
        AppError::Storage(format!("failed to read image {}: {}", path, err))
    })?;
    let content_type = match parts.next() {
        Some(declared) => declared.to_string(),
        None => infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    };
    Ok(ImageUpload {
        file_name: path.to_string(),
        content_type,
        bytes,
    })
}
