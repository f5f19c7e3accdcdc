//! Employee table state: filters, paging, the add/edit form and deletes.

use std::str::FromStr;

use chrono::{Local, NaiveDate};
use log::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::handlers::print::{render_print_document, PrintColumn, PrintSink};
use crate::models::employee::{employee_code, Employee, Gender, Status};
use crate::models::form::{EmployeeForm, ImageUpload};
use crate::store::SharedStore;
use crate::utils::filters::{gender_options, status_options, EmployeeFilter, Facet};
use crate::utils::pagination::{total_pages, PageWindow, ITEMS_PER_PAGE};
use crate::utils::validation::{validate_form, validate_image, FormErrors, FormField};

pub const PRINT_TITLE: &str = "Employees List";

/// How new employees get their `id` and `EMP` sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Counter starting after the largest seeded id; never reuses numbers.
    #[default]
    Monotonic,
    /// `roster length + 1`; reuses numbers after deletions.
    RosterLength,
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(IdPolicy::Monotonic),
            "roster-length" | "roster_length" => Ok(IdPolicy::RosterLength),
            other => Err(format!("unknown id policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: u32 },
}

/// The open add/edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModal {
    pub mode: FormMode,
    pub form: EmployeeForm,
    pub errors: FormErrors,
    pub image_preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Armed { id: u32, full_name: String },
}

/// An accepted page change; the caller scrolls the viewport to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page: usize,
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Added(Employee),
    Updated(Employee),
}

pub struct EmployeeList {
    store: SharedStore,
    roster: Vec<Employee>,
    filter: EmployeeFilter,
    current_page: usize,
    id_policy: IdPolicy,
    next_id: u32,
    modal: Option<FormModal>,
    delete: DeleteConfirmation,
}

impl EmployeeList {
    pub fn new(store: SharedStore, id_policy: IdPolicy) -> Self {
        let roster = store.borrow().employees().to_vec();
        let next_id = roster.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        EmployeeList {
            store,
            roster,
            filter: EmployeeFilter::default(),
            current_page: 1,
            id_policy,
            next_id,
            modal: None,
            delete: DeleteConfirmation::Idle,
        }
    }

    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }

    pub fn filter(&self) -> &EmployeeFilter {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn get(&self, id: u32) -> Option<&Employee> {
        self.roster.iter().find(|e| e.id == id)
    }

    /// Returns the view to its freshly opened state: no filters, page 1,
    /// no open form and no armed delete. The roster is untouched.
    pub fn reset_view(&mut self) {
        self.filter = EmployeeFilter::default();
        self.current_page = 1;
        self.modal = None;
        self.delete = DeleteConfirmation::Idle;
    }

    fn sync_store(&self) {
        self.store.borrow_mut().update_employees(self.roster.clone());
    }

    // Filters

    pub fn status_options(&self) -> Vec<Facet<Status>> {
        status_options(&self.roster)
    }

    pub fn gender_options(&self) -> Vec<Facet<Gender>> {
        gender_options(&self.roster)
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.filter.search_term = term.to_string();
        self.current_page = 1;
    }

    /// Selects a status facet. Values absent from the roster are refused.
    /// The page is left alone and clamps on the next read.
    pub fn set_status_filter(&mut self, status: Facet<Status>) -> bool {
        if !self.status_options().contains(&status) {
            debug!("Ignoring status filter {} not present in roster", status);
            return false;
        }
        self.filter.status = status;
        true
    }

    pub fn set_gender_filter(&mut self, gender: Facet<Gender>) -> bool {
        if !self.gender_options().contains(&gender) {
            debug!("Ignoring gender filter {} not present in roster", gender);
            return false;
        }
        self.filter.gender = gender;
        self.current_page = 1;
        true
    }

    pub fn filtered(&self) -> Vec<&Employee> {
        self.filter.apply(&self.roster)
    }

    // Paging

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), ITEMS_PER_PAGE)
    }

    pub fn page(&self) -> PageWindow<&Employee> {
        PageWindow::slice(self.filtered(), self.current_page, ITEMS_PER_PAGE)
    }

    pub fn go_to_page(&mut self, page: usize) -> Option<PageChange> {
        let total = self.total_pages();
        if page < 1 || page > total {
            debug!("Rejected page {} of {}", page, total);
            return None;
        }
        self.current_page = page;
        Some(PageChange {
            page,
            scroll_to_top: true,
        })
    }

    pub fn next_page(&mut self) -> Option<PageChange> {
        let current = self.page().current_page;
        self.go_to_page(current + 1)
    }

    pub fn previous_page(&mut self) -> Option<PageChange> {
        let current = self.page().current_page;
        self.go_to_page(current.saturating_sub(1))
    }

    // Form modal

    pub fn form(&self) -> Option<&FormModal> {
        self.modal.as_ref()
    }

    pub fn open_add_form(&mut self) {
        self.modal = Some(FormModal {
            mode: FormMode::Add,
            form: EmployeeForm::default(),
            errors: FormErrors::default(),
            image_preview: None,
        });
    }

    pub fn open_edit_form(&mut self, id: u32) -> AppResult<()> {
        let employee = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("employee {}", id)))?;
        self.modal = Some(FormModal {
            mode: FormMode::Edit { id },
            form: EmployeeForm::from_employee(employee),
            errors: FormErrors::default(),
            image_preview: employee.profile_image.clone(),
        });
        Ok(())
    }

    /// Discards the open form without touching the roster.
    pub fn close_form(&mut self) {
        self.modal = None;
    }

    fn modal_mut(&mut self) -> AppResult<&mut FormModal> {
        self.modal
            .as_mut()
            .ok_or_else(|| AppError::NotFound("employee form is not open".to_string()))
    }

    /// Edits one text field and clears that field's error.
    pub fn set_field(&mut self, field: FormField, value: &str) -> AppResult<()> {
        let modal = self.modal_mut()?;
        let slot = match field {
            FormField::FullName => &mut modal.form.full_name,
            FormField::Gender => &mut modal.form.gender,
            FormField::Dob => &mut modal.form.dob,
            FormField::State => &mut modal.form.state,
            FormField::Status => &mut modal.form.status,
            FormField::ProfileImage => {
                let mut errors = FormErrors::default();
                errors.insert(field, "Use attach_image to set the profile image");
                return Err(AppError::Validation(errors));
            }
        };
        *slot = value.to_string();
        modal.errors.remove(field);
        Ok(())
    }

    /// Accepts a picked image as the new preview. A rejected image leaves the
    /// previous preview in place and records the field error.
    pub fn attach_image(&mut self, upload: &ImageUpload) -> AppResult<()> {
        let modal = self.modal_mut()?;
        match validate_image(upload) {
            Ok(preview) => {
                modal.image_preview = Some(preview);
                modal.errors.remove(FormField::ProfileImage);
                Ok(())
            }
            Err(message) => {
                debug!("Rejected image {}: {}", upload.file_name, message);
                modal.errors.insert(FormField::ProfileImage, message.clone());
                let mut errors = FormErrors::default();
                errors.insert(FormField::ProfileImage, message);
                Err(AppError::Validation(errors))
            }
        }
    }

    pub fn remove_image(&mut self) -> AppResult<()> {
        self.modal_mut()?.image_preview = None;
        Ok(())
    }

    pub fn submit(&mut self) -> AppResult<SubmitOutcome> {
        self.submit_on(Local::now().date_naive())
    }

    /// Validates the open form against `today` and applies it.
    pub fn submit_on(&mut self, today: NaiveDate) -> AppResult<SubmitOutcome> {
        let modal = self.modal_mut()?;
        let parsed = match validate_form(&modal.form, today) {
            errors if errors.is_empty() => parse_form(&modal.form),
            errors => Err(errors),
        };
        let (gender, dob, status) = match parsed {
            Ok(values) => values,
            Err(errors) => {
                debug!("Employee form rejected: {}", errors);
                modal.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
        };
        let Some(modal) = self.modal.take() else {
            return Err(AppError::NotFound("employee form is not open".to_string()));
        };
        let full_name = modal.form.full_name.trim().to_string();

        let outcome = match modal.mode {
            FormMode::Add => {
                let id = self.allocate_id();
                let employee = Employee {
                    id,
                    employee_id: employee_code(id),
                    full_name,
                    gender,
                    dob,
                    state: modal.form.state,
                    status,
                    profile_image: modal.image_preview,
                };
                info!("Added employee {} ({})", employee.employee_id, employee.full_name);
                self.roster.push(employee.clone());
                SubmitOutcome::Added(employee)
            }
            FormMode::Edit { id } => {
                let employee = self
                    .roster
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| AppError::NotFound(format!("employee {}", id)))?;
                employee.full_name = full_name;
                employee.gender = gender;
                employee.dob = dob;
                employee.state = modal.form.state;
                employee.status = status;
                employee.profile_image = modal.image_preview;
                info!("Updated employee {}", employee.employee_id);
                SubmitOutcome::Updated(employee.clone())
            }
        };

        self.sync_store();
        Ok(outcome)
    }

    fn allocate_id(&mut self) -> u32 {
        match self.id_policy {
            IdPolicy::RosterLength => self.roster.len() as u32 + 1,
            IdPolicy::Monotonic => {
                while self.is_taken(self.next_id) {
                    self.next_id += 1;
                }
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        }
    }

    fn is_taken(&self, id: u32) -> bool {
        let code = employee_code(id);
        self.roster.iter().any(|e| e.id == id || e.employee_id == code)
    }

    // Row actions

    /// Flips `Active`/`Inactive`; returns the new status, `None` for an unknown id.
    pub fn toggle_status(&mut self, id: u32) -> Option<Status> {
        let employee = self.roster.iter_mut().find(|e| e.id == id)?;
        employee.status = employee.status.toggled();
        let status = employee.status;
        info!("Employee {} is now {}", employee.employee_id, status);
        self.sync_store();
        Some(status)
    }

    pub fn delete_confirmation(&self) -> &DeleteConfirmation {
        &self.delete
    }

    /// Arms the delete confirmation for `id`.
    pub fn request_delete(&mut self, id: u32) -> bool {
        let Some(employee) = self.get(id) else {
            return false;
        };
        self.delete = DeleteConfirmation::Armed {
            id,
            full_name: employee.full_name.clone(),
        };
        true
    }

    pub fn cancel_delete(&mut self) {
        self.delete = DeleteConfirmation::Idle;
    }

    /// Removes the armed record. No-op when nothing is armed or the record is gone.
    pub fn confirm_delete(&mut self) -> Option<Employee> {
        let DeleteConfirmation::Armed { id, .. } = std::mem::take(&mut self.delete) else {
            return None;
        };
        let index = self.roster.iter().position(|e| e.id == id)?;
        let removed = self.roster.remove(index);
        info!("Deleted employee {} ({})", removed.employee_id, removed.full_name);
        self.sync_store();
        Some(removed)
    }

    // Print

    /// Panel columns for the printed employee list.
    pub fn print_columns() -> Vec<PrintColumn> {
        vec![
            PrintColumn::new("id", "S.No."),
            PrintColumn::new("fullName", "Employee Name"),
            PrintColumn::new("employeeId", "Employee ID"),
            PrintColumn::new("gender", "Gender"),
            PrintColumn::date("dob", "Date of Birth"),
            PrintColumn::new("state", "State"),
            PrintColumn::new("status", "Status"),
        ]
    }

    /// Prints every filtered row (all pages); returns the row count.
    pub fn print(&self, sink: &mut dyn PrintSink) -> AppResult<usize> {
        let rows = self.filtered();
        let document = render_print_document(&rows, &Self::print_columns(), PRINT_TITLE)?;
        sink.print(PRINT_TITLE, &document)?;
        info!("Printed {} employees", rows.len());
        Ok(rows.len())
    }
}

/// Typed values of an already validated form; a value that still fails to
/// parse is reported against its field.
fn parse_form(form: &EmployeeForm) -> Result<(Gender, NaiveDate, Status), FormErrors> {
    let mut errors = FormErrors::default();
    let gender = form
        .gender
        .parse::<Gender>()
        .map_err(|msg| errors.insert(FormField::Gender, msg))
        .ok();
    let dob = NaiveDate::parse_from_str(form.dob.trim(), "%Y-%m-%d")
        .map_err(|_| errors.insert(FormField::Dob, "Date of Birth is invalid"))
        .ok();
    let status = form
        .status
        .parse::<Status>()
        .map_err(|msg| errors.insert(FormField::Status, msg))
        .ok();
    match (gender, dob, status) {
        (Some(gender), Some(dob), Some(status)) => Ok((gender, dob, status)),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::store::SessionStore;

    fn list_with(roster: Vec<Employee>) -> EmployeeList {
        let store = SessionStore::new(Box::new(MemoryStorage::new()), roster).into_shared();
        EmployeeList::new(store, IdPolicy::Monotonic)
    }

    fn staff(n: u32) -> Vec<Employee> {
        (1..=n)
            .map(|id| Employee {
                id,
                employee_id: employee_code(id),
                full_name: format!("Person {}", id),
                gender: if id % 2 == 0 { Gender::Female } else { Gender::Male },
                dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                state: "Goa".to_string(),
                status: Status::Active,
                profile_image: None,
            })
            .collect()
    }

    #[test]
    fn id_policy_parses() {
        assert_eq!("monotonic".parse::<IdPolicy>(), Ok(IdPolicy::Monotonic));
        assert_eq!("Roster-Length".parse::<IdPolicy>(), Ok(IdPolicy::RosterLength));
        assert!("random".parse::<IdPolicy>().is_err());
    }

    #[test]
    fn status_filter_does_not_reset_page_but_clamps() {
        let mut list = list_with(staff(25));
        list.toggle_status(1);
        assert!(list.go_to_page(3).is_some());
        assert!(list.set_status_filter(Facet::Only(Status::Inactive)));
        assert_eq!(list.current_page(), 3);
        assert_eq!(list.page().current_page, 1);
        assert_eq!(list.page().rows.len(), 1);
    }

    #[test]
    fn gender_filter_resets_page() {
        let mut list = list_with(staff(25));
        list.go_to_page(2);
        assert!(list.set_gender_filter(Facet::Only(Gender::Female)));
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn unseen_facet_value_is_refused() {
        let mut list = list_with(staff(3));
        assert!(!list.set_gender_filter(Facet::Only(Gender::Other)));
        assert!(!list.set_status_filter(Facet::Only(Status::Inactive)));
        assert_eq!(list.filter(), &EmployeeFilter::default());
    }

    #[test]
    fn set_field_clears_its_error() {
        let mut list = list_with(staff(1));
        list.open_add_form();
        let err = list.submit_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(matches!(err, Err(AppError::Validation(_))));
        assert!(list.form().unwrap().errors.contains(FormField::FullName));

        list.set_field(FormField::FullName, "Zoya").unwrap();
        let modal = list.form().unwrap();
        assert!(!modal.errors.contains(FormField::FullName));
        assert!(modal.errors.contains(FormField::Gender));
    }

    #[test]
    fn form_actions_need_open_form() {
        let mut list = list_with(staff(1));
        assert!(list.set_field(FormField::FullName, "x").is_err());
        assert!(matches!(list.submit(), Err(AppError::NotFound(_))));
    }

    #[test]
    fn cancel_delete_keeps_record() {
        let mut list = list_with(staff(2));
        assert!(list.request_delete(2));
        list.cancel_delete();
        assert_eq!(list.delete_confirmation(), &DeleteConfirmation::Idle);
        assert_eq!(list.confirm_delete(), None);
        assert_eq!(list.roster().len(), 2);
    }

    #[test]
    fn previous_on_first_page_is_refused() {
        let mut list = list_with(staff(25));
        assert_eq!(list.previous_page(), None);
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn next_on_last_page_is_refused() {
        let mut list = list_with(staff(25));
        assert_eq!(list.next_page().map(|change| change.page), Some(2));
        assert_eq!(list.next_page().map(|change| change.page), Some(3));
        assert_eq!(list.next_page(), None);
        assert_eq!(list.current_page(), 3);
        assert_eq!(list.previous_page().map(|change| change.page), Some(2));
    }

    #[test]
    fn paging_steps_from_clamped_page() {
        let mut list = list_with(staff(25));
        for id in 1..=15 {
            list.toggle_status(id);
        }
        assert!(list.go_to_page(3).is_some());
        assert!(list.set_status_filter(Facet::Only(Status::Inactive)));
        assert_eq!(list.current_page(), 3);
        assert_eq!(list.total_pages(), 2);

        assert_eq!(list.next_page(), None);
        assert_eq!(list.page().current_page, 2);
        assert_eq!(
            list.previous_page(),
            Some(PageChange {
                page: 1,
                scroll_to_top: true
            })
        );
        assert_eq!(list.page().rows.len(), 10);
    }

    #[test]
    fn previous_steps_from_clamped_page() {
        let mut list = list_with(staff(25));
        list.toggle_status(1);
        assert!(list.go_to_page(3).is_some());
        assert!(list.set_status_filter(Facet::Only(Status::Inactive)));
        assert_eq!(list.previous_page(), None);
        assert_eq!(list.page().current_page, 1);
    }

    #[test]
    fn reset_view_clears_filters_form_and_pending_delete() {
        let mut list = list_with(staff(25));
        list.set_search_term("Person 2");
        list.go_to_page(2);
        list.open_add_form();
        assert!(list.request_delete(4));

        list.reset_view();
        assert_eq!(list.filter(), &EmployeeFilter::default());
        assert_eq!(list.current_page(), 1);
        assert!(list.form().is_none());
        assert_eq!(list.confirm_delete(), None);
        assert_eq!(list.roster().len(), 25);
    }

    #[test]
    fn monotonic_ids_skip_codes_already_in_use() {
        let mut roster = staff(2);
        roster[0].employee_id = employee_code(3);
        let mut list = list_with(roster);
        list.open_add_form();
        for (field, value) in [
            (FormField::FullName, "Nia Roy"),
            (FormField::Gender, "Female"),
            (FormField::Dob, "1990-01-01"),
            (FormField::State, "Goa"),
        ] {
            list.set_field(field, value).unwrap();
        }
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let Ok(SubmitOutcome::Added(added)) = list.submit_on(today) else {
            panic!("form should be accepted");
        };
        assert_eq!(added.id, 4);
        assert_eq!(added.employee_id, "EMP004");
    }
}
