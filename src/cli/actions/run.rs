use crate::cli::actions::{auth, dashboard, hobbies, phones, profile, students, users, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Auth(globals, args) => auth::execute(&globals, args).await,
        Action::Dashboard(globals) => dashboard::execute(&globals).await,
        Action::Students(globals, args) => students::execute(&globals, args).await,
        Action::Hobbies(globals, args) => hobbies::execute(&globals, args).await,
        Action::Phones(globals, args) => phones::execute(&globals, args).await,
        Action::Users(globals, args) => users::execute(&globals, args).await,
        Action::Profile(globals, args) => profile::execute(&globals, args).await,
    }
}
