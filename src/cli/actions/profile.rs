use crate::{
    cli::{
        actions::{ensure_confirmed, print_json, print_message},
        globals::GlobalArgs,
    },
    features::profile::{self, PasswordChange, Profile, ProfileInput},
    format::NOT_AVAILABLE,
    views,
};
use anyhow::Result;
use secrecy::SecretString;
use serde_json::Value;

/// Fields given on `profile update`; an empty address or city clears it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub alamat: Option<String>,
    pub kota: Option<String>,
}

impl ProfileChanges {
    #[must_use]
    pub fn apply(self, mut input: ProfileInput) -> ProfileInput {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(email) = self.email {
            input.email = email;
        }
        if self.alamat.is_some() {
            input.alamat = self.alamat;
        }
        if self.kota.is_some() {
            input.kota = self.kota;
        }
        input
    }
}

#[derive(Debug)]
pub enum Args {
    Show,
    Update(ProfileChanges),
    ChangePassword(PasswordChange),
    Delete {
        password: SecretString,
        confirmed: bool,
    },
    Stats,
}

/// # Errors
/// Returns an error if no token is stored, validation fails or the request fails.
pub async fn execute(globals: &GlobalArgs, args: Args) -> Result<()> {
    if let Args::Delete { confirmed, .. } = &args {
        ensure_confirmed(*confirmed, "your account")?;
    }

    let client = globals.client()?;
    let token = globals.token()?;

    match args {
        Args::Show => {
            let profile = profile::get(&client, &token).await?;
            show(globals, &profile)
        }
        Args::Update(changes) => {
            let current = profile::get(&client, &token).await?;
            let input = changes.apply(ProfileInput::from_profile(&current));
            let updated = profile::update(&client, &token, &input).await?;
            show(globals, &updated)
        }
        Args::ChangePassword(change) => {
            let message = profile::change_password(&client, &token, &change).await?;
            print_message(globals, message, "Password changed")
        }
        Args::Delete { password, .. } => {
            let message = profile::delete_account(&client, &token, &password).await?;
            // the token died with the account
            globals.store().remove()?;
            print_message(globals, message, "Account deleted")
        }
        Args::Stats => {
            let stats = profile::statistics(&client, &token).await?;
            if globals.json {
                return print_json(&stats);
            }
            println!("{}", render_stats(&stats));
            Ok(())
        }
    }
}

fn show(globals: &GlobalArgs, profile: &Profile) -> Result<()> {
    if globals.json {
        return print_json(profile);
    }
    let or_na = |value: &str| {
        if value.trim().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            value.to_string()
        }
    };
    let mut table = views::table(["Field", "Value"]);
    table.add_row(vec!["Name".to_string(), profile.name.clone()]);
    table.add_row(vec!["Email".to_string(), profile.email.clone()]);
    table.add_row(vec!["Address".to_string(), or_na(&profile.alamat)]);
    table.add_row(vec!["City".to_string(), or_na(&profile.kota)]);
    println!("{table}");
    Ok(())
}

/// One row per top-level statistic; nested values are shown as JSON.
fn render_stats(stats: &Value) -> comfy_table::Table {
    let mut table = views::table(["Statistic", "Value"]);
    match stats {
        Value::Object(map) => {
            for (key, value) in map {
                let value = match value {
                    Value::String(text) => text.clone(),
                    Value::Null => NOT_AVAILABLE.to_string(),
                    other => other.to_string(),
                };
                table.add_row(vec![key.clone(), value]);
            }
        }
        other => {
            table.add_row(vec!["value".to_string(), other.to_string()]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_clear_with_empty_strings() {
        let current = ProfileInput {
            name: "Admin".to_string(),
            email: "admin@sekolah.id".to_string(),
            alamat: Some("Jl. Merdeka 1".to_string()),
            kota: Some("Bandung".to_string()),
        };
        let changes = ProfileChanges {
            kota: Some(String::new()),
            ..ProfileChanges::default()
        };
        let input = changes.apply(current);
        assert_eq!(input.alamat.as_deref(), Some("Jl. Merdeka 1"));
        assert_eq!(input.formatted().kota, None);
    }

    #[test]
    fn stats_render_scalars_and_nested() {
        let stats = serde_json::json!({
            "account_age_days": 12,
            "last_login": null,
            "roles": ["admin"]
        });
        let rendered = render_stats(&stats).to_string();
        assert!(rendered.contains("account_age_days"));
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("[\"admin\"]"));
    }
}
