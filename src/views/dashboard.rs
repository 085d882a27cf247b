//! Overview section: record counts and the operator's name.

use super::table;
use crate::{
    api::ApiClient,
    features::{hobby, profile, siswa, users},
};
use comfy_table::{Cell, CellAlignment, Table};
use secrecy::SecretString;
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_hobbies: usize,
    /// Users on the first page of the listing, not the server-wide total.
    pub total_users: usize,
    pub operator: Option<String>,
}

/// Fetches the four sections concurrently. A section that fails counts as 0.
pub async fn load(client: &ApiClient, token: &SecretString) -> DashboardStats {
    let (students, hobbies, first_users_page, operator) = tokio::join!(
        siswa::list(client, token),
        hobby::list(client, token),
        users::list(client, token, 1),
        profile::get(client, token),
    );

    DashboardStats {
        total_students: students
            .map(|students| students.len())
            .unwrap_or_else(|err| {
                warn!("failed to count students: {err}");
                0
            }),
        total_hobbies: hobbies.map(|hobbies| hobbies.len()).unwrap_or_else(|err| {
            warn!("failed to count hobbies: {err}");
            0
        }),
        total_users: first_users_page
            .map(|page| page.items.len())
            .unwrap_or_else(|err| {
                warn!("failed to count users: {err}");
                0
            }),
        operator: operator
            .map(|profile| profile.name)
            .map_err(|err| warn!("failed to load profile: {err}"))
            .ok(),
    }
}

#[must_use]
pub fn greeting(stats: &DashboardStats) -> String {
    match stats.operator.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome back, {name}!"),
        None => "Welcome back!".to_string(),
    }
}

#[must_use]
pub fn render(stats: &DashboardStats) -> Table {
    let mut table = table(["Section", "Total"]);
    for (section, total) in [
        ("Students", stats.total_students),
        ("Hobbies", stats.total_hobbies),
        ("Users", stats.total_users),
    ] {
        table.add_row(vec![
            Cell::new(section),
            Cell::new(total).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
