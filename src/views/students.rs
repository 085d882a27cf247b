//! Students section.

use super::table;
use crate::{features::siswa::Student, format::NOT_AVAILABLE};
use comfy_table::Table;
use serde::Serialize;

/// Name search (case-insensitive substring) and optional hobby filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub search: String,
    pub hobby: Option<u64>,
}

impl StudentFilter {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.hobby.is_some()
    }

    #[must_use]
    pub fn matches(&self, student: &Student) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty() || student.name.to_lowercase().contains(&search);
        let matches_hobby = self.hobby.is_none_or(|id| student.has_hobby(id));
        matches_search && matches_hobby
    }
}

#[must_use]
pub fn filter<'a>(students: &'a [Student], filter: &StudentFilter) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|student| filter.matches(student))
        .collect()
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StudentRow {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub nisn: String,
    pub hobbies: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            phone: student.first_phone().unwrap_or(NOT_AVAILABLE).to_string(),
            nisn: student.first_nisn().unwrap_or(NOT_AVAILABLE).to_string(),
            hobbies: student.hobby_names(),
        }
    }
}

/// Title and hint shown when the filtered list is empty.
#[must_use]
pub fn empty_state(filter: &StudentFilter) -> (&'static str, &'static str) {
    if filter.is_active() {
        (
            "No students found",
            "Try adjusting your search or filter criteria",
        )
    } else {
        ("No students yet", "Get started by adding your first student")
    }
}

#[must_use]
pub fn render(rows: &[StudentRow]) -> Table {
    let mut table = table(["ID", "Name", "Phone", "NISN", "Hobbies"]);
    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.name.clone(),
            row.phone.clone(),
            row.nisn.clone(),
            row.hobbies.clone(),
        ]);
    }
    table
}
