//! Users section. Pagination is done by the server.

use super::table;
use crate::{
    api::{Page, Pagination},
    features::users::User,
};
use comfy_table::Table;

#[must_use]
pub fn render(page: &Page<User>) -> Table {
    let mut table = table(["ID", "Name", "Email", "Verified", "Joined"]);
    for user in &page.items {
        table.add_row(vec![
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            if user.is_verified() { "yes" } else { "no" }.to_string(),
            user.joined(),
        ]);
    }
    table
}

/// "Page x of y (total n)", plus the next page flag while more pages remain.
#[must_use]
pub fn footer(pagination: &Pagination) -> String {
    let position = format!(
        "Page {} of {} (total {})",
        pagination.current_page,
        pagination.last_page(),
        pagination.total
    );
    if pagination.has_next() {
        format!("{position}, next: --page {}", pagination.current_page + 1)
    } else {
        position
    }
}

#[must_use]
pub fn empty_state(query: Option<&str>) -> &'static str {
    if query.is_some_and(|query| !query.trim().is_empty()) {
        "No users found"
    } else {
        "No users yet"
    }
}
