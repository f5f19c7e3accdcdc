use std::collections::BTreeMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use validator::Validate;

use crate::models::form::{EmployeeForm, ImageUpload};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Gender,
    Dob,
    State,
    Status,
    ProfileImage,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Gender => "gender",
            FormField::Dob => "dob",
            FormField::State => "state",
            FormField::Status => "status",
            FormField::ProfileImage => "profileImage",
        }
    }

    /// Maps a struct field name reported by `validator` to its form field.
    fn from_struct_field(name: &str) -> Option<FormField> {
        match name {
            "full_name" => Some(FormField::FullName),
            "gender" => Some(FormField::Gender),
            "dob" => Some(FormField::Dob),
            "state" => Some(FormField::State),
            "status" => Some(FormField::Status),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-field error messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Keeps the entries of `other` that describe fields without an error yet.
    fn merge_missing(&mut self, other: FormErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validates the text fields of the employee form against `today`.
///
/// Pure: the outcome depends only on the entered values and the date passed in.
pub fn validate_form(form: &EmployeeForm, today: NaiveDate) -> FormErrors {
    let mut errors = FormErrors::default();

    if let Err(err) = form.validate() {
        for (name, field_errors) in err.field_errors() {
            let Some(field) = FormField::from_struct_field(name) else {
                continue;
            };
            if let Some(message) = field_errors.first().and_then(|e| e.message.as_ref()) {
                errors.insert(field, message.to_string());
            }
        }
    }

    errors.merge_missing(validate_dob(&form.dob, today));
    errors
}

fn validate_dob(dob: &str, today: NaiveDate) -> FormErrors {
    let mut errors = FormErrors::default();
    if dob.trim().is_empty() {
        errors.insert(FormField::Dob, "Date of Birth is required");
        return errors;
    }
    match NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d") {
        Ok(date) if date > today => {
            errors.insert(FormField::Dob, "Date of Birth cannot be in the future");
        }
        Ok(_) => {}
        Err(_) => {
            errors.insert(FormField::Dob, "Date of Birth is invalid");
        }
    }
    errors
}

/// Checks a picked profile image; on success returns the `data:` URL preview.
pub fn validate_image(upload: &ImageUpload) -> Result<String, String> {
    if !upload.content_type.starts_with("image/") {
        return Err("Please select a valid image file".to_string());
    }
    // A declared image type must not hide a recognisable non-image payload.
    if let Some(kind) = infer::get(&upload.bytes) {
        if !matches!(kind.matcher_type(), infer::MatcherType::Image) {
            return Err("Please select a valid image file".to_string());
        }
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err("Image size should be less than 5MB".to_string());
    }

    let mime = infer::get(&upload.bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| upload.content_type.clone());
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&upload.bytes)))
}
