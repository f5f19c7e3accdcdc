use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Regions an employee can be assigned to.
pub const REGIONS: [&str; 29] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
];

pub fn is_known_region(state: &str) -> bool {
    REGIONS.contains(&state)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Inactive,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    pub fn toggled(self) -> Status {
        match self {
            Status::Active => Status::Inactive,
            Status::Inactive => Status::Active,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!("unknown gender '{}'", s)),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Status::Active),
            "Inactive" => Ok(Status::Inactive),
            _ => Err(format!("unknown status '{}'", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u32,
    pub employee_id: String,
    pub full_name: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub state: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Builds the display code for the `seq`-th employee, e.g. `EMP004`.
pub fn employee_code(seq: u32) -> String {
    format!("EMP{:03}", seq)
}

impl Employee {
    /// Lower-cased text the search box matches against.
    pub fn matches_term(&self, term_lower: &str) -> bool {
        self.full_name.to_lowercase().contains(term_lower)
            || self.employee_id.to_lowercase().contains(term_lower)
            || self.state.to_lowercase().contains(term_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_code_is_zero_padded() {
        assert_eq!(employee_code(4), "EMP004");
        assert_eq!(employee_code(42), "EMP042");
        assert_eq!(employee_code(1234), "EMP1234");
    }

    #[test]
    fn status_toggles_both_ways() {
        assert_eq!(Status::Active.toggled(), Status::Inactive);
        assert_eq!(Status::Inactive.toggled(), Status::Active);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let employee = Employee {
            id: 1,
            employee_id: employee_code(1),
            full_name: "Asha Rao".to_string(),
            gender: Gender::Female,
            dob: NaiveDate::from_ymd_opt(1990, 1, 5).unwrap(),
            state: "Kerala".to_string(),
            status: Status::Active,
            profile_image: None,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["employeeId"], "EMP001");
        assert_eq!(json["fullName"], "Asha Rao");
        assert_eq!(json["dob"], "1990-01-05");
        assert!(json.get("profileImage").is_none());
    }

    #[test]
    fn region_list_contains_delhi() {
        assert!(is_known_region("Delhi"));
        assert!(!is_known_region("delhi"));
        assert_eq!(REGIONS.len(), 29);
    }
}
