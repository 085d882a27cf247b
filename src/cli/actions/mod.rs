pub mod auth;
pub mod dashboard;
pub mod hobbies;
pub mod phones;
pub mod profile;
pub mod students;
pub mod users;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;
use anyhow::{bail, Result};
use serde::Serialize;

#[derive(Debug)]
pub enum Action {
    Auth(GlobalArgs, auth::Args),
    Dashboard(GlobalArgs),
    Students(GlobalArgs, students::Args),
    Hobbies(GlobalArgs, hobbies::Args),
    Phones(GlobalArgs, phones::Args),
    Users(GlobalArgs, users::Args),
    Profile(GlobalArgs, profile::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Client-side page selection for lists the server returns whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub per_page: usize,
}

impl Paging {
    /// "Page x of y (total n)" for `total` rows.
    #[must_use]
    pub fn footer(&self, total: usize) -> String {
        format!(
            "Page {} of {} (total {total})",
            self.page,
            crate::views::page_count(total, self.per_page)
        )
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the server message, or `fallback` when it sent none.
pub(crate) fn print_message(globals: &GlobalArgs, message: Option<String>, fallback: &str) -> Result<()> {
    let message = message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    if globals.json {
        print_json(&serde_json::json!({ "message": message }))
    } else {
        println!("{message}");
        Ok(())
    }
}

pub(crate) fn ensure_confirmed(confirmed: bool, what: &str) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete {what} without --yes");
    }
    Ok(())
}
