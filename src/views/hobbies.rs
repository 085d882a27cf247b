//! Hobbies section.

use super::table;
use crate::features::hobby::Hobby;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;

#[must_use]
pub fn filter<'a>(hobbies: &'a [Hobby], search: &str) -> Vec<&'a Hobby> {
    let search = search.trim().to_lowercase();
    hobbies
        .iter()
        .filter(|hobby| search.is_empty() || hobby.name.to_lowercase().contains(&search))
        .collect()
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HobbyRow {
    pub id: u64,
    pub name: String,
    pub students: usize,
    pub created: String,
}

impl From<&Hobby> for HobbyRow {
    fn from(hobby: &Hobby) -> Self {
        Self {
            id: hobby.id,
            name: hobby.name.clone(),
            students: hobby.student_count(),
            created: hobby.created_date(),
        }
    }
}

#[must_use]
pub fn empty_state(search: &str) -> (&'static str, &'static str) {
    if search.trim().is_empty() {
        ("No hobbies yet", "Get started by adding your first hobby")
    } else {
        ("No hobbies found", "Try adjusting your search criteria")
    }
}

#[must_use]
pub fn render(rows: &[HobbyRow]) -> Table {
    let mut table = table(["ID", "Name", "Students Count", "Created"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(&row.name),
            Cell::new(format!("{} students", row.students)).set_alignment(CellAlignment::Right),
            Cell::new(&row.created),
        ]);
    }
    table
}
