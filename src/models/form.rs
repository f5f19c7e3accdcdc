use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::models::employee::{is_known_region, Employee, Gender, Status};

/// Raw text fields of the add/edit employee form.
///
/// Values are kept exactly as entered; `utils::validation::validate_form`
/// decides whether they describe a valid employee.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct EmployeeForm {
    #[validate(custom = "validate_full_name")]
    pub full_name: String,
    #[validate(custom = "validate_gender")]
    pub gender: String,
    // Checked against the clock in `validate_form`.
    pub dob: String,
    #[validate(custom = "validate_state")]
    pub state: String,
    #[validate(custom = "validate_status")]
    pub status: String,
}

/// An image picked in the profile image field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        EmployeeForm {
            full_name: String::new(),
            gender: String::new(),
            dob: String::new(),
            state: String::new(),
            status: Status::Active.as_str().to_string(),
        }
    }
}

impl EmployeeForm {
    pub fn from_employee(employee: &Employee) -> Self {
        EmployeeForm {
            full_name: employee.full_name.clone(),
            gender: employee.gender.as_str().to_string(),
            dob: employee.dob.format("%Y-%m-%d").to_string(),
            state: employee.state.clone(),
            status: employee.status.as_str().to_string(),
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(field_error("required", "Full Name is required"));
    }
    if trimmed.chars().count() < 2 {
        return Err(field_error(
            "length",
            "Full Name must be at least 2 characters",
        ));
    }
    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if gender.is_empty() {
        return Err(field_error("required", "Gender is required"));
    }
    if gender.parse::<Gender>().is_err() {
        return Err(field_error(
            "choice",
            "Gender must be Male, Female or Other",
        ));
    }
    Ok(())
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.is_empty() {
        return Err(field_error("required", "State is required"));
    }
    if !is_known_region(state) {
        return Err(field_error("choice", "State is not a recognised region"));
    }
    Ok(())
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if status.is_empty() {
        return Err(field_error("required", "Status is required"));
    }
    if status.parse::<Status>().is_err() {
        return Err(field_error("choice", "Status must be Active or Inactive"));
    }
    Ok(())
}
