use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use log::info;

use crate::errors::{AppError, AppResult};
use crate::models::employee::{employee_code, is_known_region, Employee, Gender, Status};

const SEED: [(&str, Gender, (i32, u32, u32), &str, Status); 12] = [
    ("Aarav Sharma", Gender::Male, (1990, 4, 12), "Maharashtra", Status::Active),
    ("Diya Patel", Gender::Female, (1993, 8, 23), "Gujarat", Status::Active),
    ("Rohan Iyer", Gender::Male, (1988, 1, 5), "Tamil Nadu", Status::Inactive),
    ("Ananya Reddy", Gender::Female, (1995, 11, 30), "Telangana", Status::Active),
    ("Kabir Singh", Gender::Male, (1991, 6, 17), "Punjab", Status::Active),
    ("Ishaan Verma", Gender::Male, (1987, 3, 9), "Uttar Pradesh", Status::Inactive),
    ("Meera Nair", Gender::Female, (1994, 9, 2), "Kerala", Status::Active),
    ("Sam Fernandes", Gender::Other, (1992, 12, 14), "Goa", Status::Active),
    ("Priya Das", Gender::Female, (1996, 2, 28), "West Bengal", Status::Active),
    ("Vikram Rathore", Gender::Male, (1985, 7, 21), "Rajasthan", Status::Inactive),
    ("Neha Gupta", Gender::Female, (1998, 5, 6), "Delhi", Status::Active),
    ("Arjun Hegde", Gender::Male, (1989, 10, 19), "Karnataka", Status::Active),
];

/// Roster the panel starts with when no seed file is configured.
pub fn default_roster() -> Vec<Employee> {
    SEED.iter()
        .zip(1u32..)
        .filter_map(|((name, gender, (y, m, d), state, status), id)| {
            Some(Employee {
                id,
                employee_id: employee_code(id),
                full_name: name.to_string(),
                gender: *gender,
                dob: NaiveDate::from_ymd_opt(*y, *m, *d)?,
                state: state.to_string(),
                status: *status,
                profile_image: None,
            })
        })
        .collect()
}

/// Loads a roster from a JSON array of employees.
pub fn load_roster(path: impl AsRef<Path>) -> AppResult<Vec<Employee>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| {
        AppError::Config(format!("failed to read seed file {}: {}", path.display(), err))
    })?;
    let roster: Vec<Employee> = serde_json::from_str(&raw).map_err(|err| {
        AppError::Config(format!("invalid seed file {}: {}", path.display(), err))
    })?;
    check_roster(&roster, Local::now().date_naive())
        .map_err(|msg| AppError::Config(format!("invalid seed file {}: {}", path.display(), msg)))?;
    info!("Loaded {} employees from {}", roster.len(), path.display());
    Ok(roster)
}

/// Rejects rosters with repeated ids or codes, unknown regions or future birth dates.
pub fn check_roster(roster: &[Employee], today: NaiveDate) -> Result<(), String> {
    let mut ids = HashSet::new();
    let mut codes = HashSet::new();
    for employee in roster {
        if !ids.insert(employee.id) {
            return Err(format!("duplicate id {}", employee.id));
        }
        if !codes.insert(employee.employee_id.as_str()) {
            return Err(format!("duplicate employeeId {}", employee.employee_id));
        }
        if !is_known_region(&employee.state) {
            return Err(format!(
                "unknown state '{}' for {}",
                employee.state, employee.employee_id
            ));
        }
        if employee.dob > today {
            return Err(format!(
                "date of birth {} for {} is in the future",
                employee.dob, employee.employee_id
            ));
        }
    }
    Ok(())
}
