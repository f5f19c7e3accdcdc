//! Facet options and the search/filter predicate for the employee table.

use std::fmt;
use std::str::FromStr;

use crate::models::employee::{Employee, Gender, Status};

/// A facet selection: the `All` wildcard or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet<T> {
    All,
    Only(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str("All"),
            Facet::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(Facet::All);
        }
        s.parse().map(Facet::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub search_term: String,
    pub status: Facet<Status>,
    pub gender: Facet<Gender>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        if !self.status.admits(&employee.status) || !self.gender.admits(&employee.gender) {
            return false;
        }
        let term = self.search_term.trim().to_lowercase();
        term.is_empty() || employee.matches_term(&term)
    }

    /// Matching employees in roster order.
    pub fn apply<'a>(&self, roster: &'a [Employee]) -> Vec<&'a Employee> {
        roster.iter().filter(|e| self.matches(e)).collect()
    }
}

/// `All` followed by the distinct values of one facet in first-seen order.
pub fn facet_options<T, F>(roster: &[Employee], pick: F) -> Vec<Facet<T>>
where
    T: PartialEq + Copy,
    F: Fn(&Employee) -> T,
{
    let mut options = vec![Facet::All];
    for employee in roster {
        let value = Facet::Only(pick(employee));
        if !options.contains(&value) {
            options.push(value);
        }
    }
    options
}

pub fn status_options(roster: &[Employee]) -> Vec<Facet<Status>> {
    facet_options(roster, |e| e.status)
}

pub fn gender_options(roster: &[Employee]) -> Vec<Facet<Gender>> {
    facet_options(roster, |e| e.gender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::employee_code;
    use chrono::NaiveDate;

    fn employee(id: u32, name: &str, gender: Gender, state: &str, status: Status) -> Employee {
        Employee {
            id,
            employee_id: employee_code(id),
            full_name: name.to_string(),
            gender,
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            state: state.to_string(),
            status,
            profile_image: None,
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee(1, "Meera Nair", Gender::Female, "Kerala", Status::Inactive),
            employee(2, "Arjun Singh", Gender::Male, "Punjab", Status::Active),
            employee(3, "Kiran Das", Gender::Other, "Assam", Status::Active),
            employee(4, "Neha Gupta", Gender::Female, "Delhi", Status::Active),
        ]
    }

    #[test]
    fn options_are_first_seen_order() {
        let roster = roster();
        assert_eq!(
            status_options(&roster),
            vec![Facet::All, Facet::Only(Status::Inactive), Facet::Only(Status::Active)]
        );
        assert_eq!(
            gender_options(&roster),
            vec![
                Facet::All,
                Facet::Only(Gender::Female),
                Facet::Only(Gender::Male),
                Facet::Only(Gender::Other)
            ]
        );
    }

    #[test]
    fn empty_roster_yields_only_all() {
        assert_eq!(status_options(&[]), vec![Facet::All]);
        assert_eq!(gender_options(&[]), vec![Facet::All]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_code_and_state() {
        let roster = roster();
        let mut filter = EmployeeFilter {
            search_term: "  NAIR ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&roster).len(), 1);

        filter.search_term = "emp00".to_string();
        assert_eq!(filter.apply(&roster).len(), 4);

        filter.search_term = "punj".to_string();
        let hits = filter.apply(&roster);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn facets_combine_with_search() {
        let roster = roster();
        let filter = EmployeeFilter {
            search_term: "a".to_string(),
            status: Facet::Only(Status::Active),
            gender: Facet::Only(Gender::Female),
        };
        let ids: Vec<u32> = filter.apply(&roster).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn filtered_result_is_ordered_subsequence() {
        let roster = roster();
        let filter = EmployeeFilter {
            status: Facet::Only(Status::Active),
            ..Default::default()
        };
        let ids: Vec<u32> = filter.apply(&roster).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn facet_parses_sentinel_and_values() {
        assert_eq!("All".parse::<Facet<Status>>(), Ok(Facet::All));
        assert_eq!("Inactive".parse::<Facet<Status>>(), Ok(Facet::Only(Status::Inactive)));
        assert!("Unknown".parse::<Facet<Gender>>().is_err());
        assert_eq!(Facet::Only(Gender::Male).to_string(), "Male");
    }
}
