//! Command-line argument dispatch.
//!
//! Maps parsed arguments to an [`Action`]: the shared connection settings go
//! into [`GlobalArgs`], the subcommand and its flags into the action's args.

use crate::{
    api::ApiConfig,
    cli::{
        actions::{
            auth as auth_action, hobbies as hobbies_action, phones as phones_action,
            profile as profile_action, students as students_action, users as users_action, Action,
            Paging,
        },
        commands::{
            api, auth, hobbies, profile, students, users, ARG_ID, ARG_PAGE, ARG_PER_PAGE,
            ARG_SEARCH, ARG_YES, CMD_CREATE, CMD_DASHBOARD, CMD_DELETE, CMD_LIST, CMD_PHONES,
            CMD_SHOW, CMD_UPDATE, DEFAULT_PER_PAGE,
        },
        globals::GlobalArgs,
    },
    features::{
        auth::{LoginInput, RegisterInput, ResetPasswordInput},
        hobby::HobbyInput,
        profile::PasswordChange,
        siswa::StudentInput,
        users::UserInput,
    },
    session::default_token_path,
    views::students::StudentFilter,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::time::Duration;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the API URL is invalid or a required argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    let action = match name {
        auth::CMD_LOGIN => Action::Auth(
            globals,
            auth_action::Args::Login(LoginInput {
                email: string(sub, auth::ARG_EMAIL)?,
                password: secret(sub, auth::ARG_PASSWORD)?,
            }),
        ),
        auth::CMD_REGISTER => Action::Auth(
            globals,
            auth_action::Args::Register(RegisterInput {
                name: string(sub, auth::ARG_NAME)?,
                email: string(sub, auth::ARG_EMAIL)?,
                password: secret(sub, auth::ARG_PASSWORD)?,
                password_confirmation: secret(sub, auth::ARG_PASSWORD_CONFIRMATION)?,
            }),
        ),
        auth::CMD_LOGOUT => Action::Auth(globals, auth_action::Args::Logout),
        auth::CMD_WHOAMI => Action::Auth(globals, auth_action::Args::Whoami),
        auth::CMD_FORGOT_PASSWORD => Action::Auth(
            globals,
            auth_action::Args::ForgotPassword {
                email: string(sub, auth::ARG_EMAIL)?,
            },
        ),
        auth::CMD_RESET_PASSWORD => Action::Auth(
            globals,
            auth_action::Args::ResetPassword(ResetPasswordInput {
                token: secret(sub, auth::ARG_RESET_TOKEN)?,
                email: string(sub, auth::ARG_EMAIL)?,
                password: secret(sub, auth::ARG_PASSWORD)?,
                password_confirmation: secret(sub, auth::ARG_PASSWORD_CONFIRMATION)?,
            }),
        ),
        auth::CMD_EMAIL => Action::Auth(globals, email_args(sub)?),
        CMD_DASHBOARD => Action::Dashboard(globals),
        students::CMD_STUDENTS => Action::Students(globals, students_args(sub)?),
        hobbies::CMD_HOBBIES => Action::Hobbies(globals, hobbies_args(sub)?),
        CMD_PHONES => Action::Phones(
            globals,
            phones_action::Args {
                paging: paging(sub),
            },
        ),
        users::CMD_USERS => Action::Users(globals, users_args(sub)?),
        profile::CMD_PROFILE => Action::Profile(globals, profile_args(sub)?),
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let options = api::Options::parse(matches)?;
    let config = ApiConfig::new(&options.url, Duration::from_secs(options.timeout_seconds))
        .with_context(|| format!("invalid --{}", api::ARG_API_URL))?;

    let mut globals = GlobalArgs::new(
        config,
        options.token_file.unwrap_or_else(default_token_path),
    );
    globals.json = options.json;
    Ok(globals)
}

fn email_args(matches: &ArgMatches) -> Result<auth_action::Args> {
    let (name, sub) = matches
        .subcommand()
        .context("missing email subcommand, see --help")?;
    Ok(match name {
        auth::CMD_EMAIL_SEND => auth_action::Args::SendVerificationEmail,
        auth::CMD_EMAIL_VERIFY => auth_action::Args::VerifyEmail,
        auth::CMD_EMAIL_VERIFY_LINK => auth_action::Args::VerifyEmailLink {
            id: string(sub, auth::ARG_ID)?,
            hash: string(sub, auth::ARG_HASH)?,
        },
        auth::CMD_EMAIL_RESEND => auth_action::Args::ResendEmailVerification,
        other => return Err(anyhow!("unknown email subcommand: {other}")),
    })
}

fn students_args(matches: &ArgMatches) -> Result<students_action::Args> {
    let (name, sub) = matches
        .subcommand()
        .context("missing students subcommand, see --help")?;
    Ok(match name {
        CMD_LIST => students_action::Args::List {
            filter: StudentFilter {
                search: optional(sub, ARG_SEARCH).unwrap_or_default(),
                hobby: sub.get_one::<u64>(students::ARG_FILTER_HOBBY).copied(),
            },
            paging: paging(sub),
        },
        CMD_SHOW => students_action::Args::Show { id: id(sub)? },
        CMD_CREATE => students_action::Args::Create(StudentInput {
            name: string(sub, students::ARG_NAME)?,
            phone: string(sub, students::ARG_PHONE)?,
            nisns: string(sub, students::ARG_NISN)?,
            hobbies: ids(sub, students::ARG_HOBBY),
        }),
        CMD_UPDATE => students_action::Args::Update {
            id: id(sub)?,
            changes: students_action::StudentChanges {
                name: optional(sub, students::ARG_NAME),
                phone: optional(sub, students::ARG_PHONE),
                nisns: optional(sub, students::ARG_NISN),
                hobbies: sub
                    .contains_id(students::ARG_HOBBY)
                    .then(|| ids(sub, students::ARG_HOBBY)),
                toggle_hobbies: ids(sub, students::ARG_TOGGLE_HOBBY),
            },
        },
        CMD_DELETE => students_action::Args::Delete {
            id: id(sub)?,
            confirmed: sub.get_flag(ARG_YES),
        },
        other => return Err(anyhow!("unknown students subcommand: {other}")),
    })
}

fn hobbies_args(matches: &ArgMatches) -> Result<hobbies_action::Args> {
    let (name, sub) = matches
        .subcommand()
        .context("missing hobbies subcommand, see --help")?;
    Ok(match name {
        CMD_LIST => hobbies_action::Args::List {
            search: optional(sub, ARG_SEARCH).unwrap_or_default(),
            paging: paging(sub),
        },
        CMD_CREATE => hobbies_action::Args::Create(HobbyInput::new(string(sub, hobbies::ARG_NAME)?)),
        CMD_UPDATE => hobbies_action::Args::Update {
            id: id(sub)?,
            input: HobbyInput::new(string(sub, hobbies::ARG_NAME)?),
        },
        CMD_DELETE => hobbies_action::Args::Delete {
            id: id(sub)?,
            confirmed: sub.get_flag(ARG_YES),
        },
        other => return Err(anyhow!("unknown hobbies subcommand: {other}")),
    })
}

fn users_args(matches: &ArgMatches) -> Result<users_action::Args> {
    let (name, sub) = matches
        .subcommand()
        .context("missing users subcommand, see --help")?;
    let page = || sub.get_one::<u32>(ARG_PAGE).copied().unwrap_or(1);
    Ok(match name {
        CMD_LIST => users_action::Args::List { page: page() },
        users::CMD_SEARCH => users_action::Args::Search {
            query: string(sub, users::ARG_QUERY)?,
            page: page(),
        },
        CMD_SHOW => users_action::Args::Show { id: id(sub)? },
        CMD_CREATE => users_action::Args::Create(UserInput {
            name: string(sub, users::ARG_NAME)?,
            email: string(sub, users::ARG_EMAIL)?,
            password: Some(secret(sub, users::ARG_PASSWORD)?),
            password_confirmation: Some(secret(sub, users::ARG_PASSWORD_CONFIRMATION)?),
        }),
        CMD_UPDATE => users_action::Args::Update {
            id: id(sub)?,
            changes: users_action::UserChanges {
                name: optional(sub, users::ARG_NAME),
                email: optional(sub, users::ARG_EMAIL),
                password: optional(sub, users::ARG_PASSWORD).map(SecretString::from),
                password_confirmation: optional(sub, users::ARG_PASSWORD_CONFIRMATION)
                    .map(SecretString::from),
            },
        },
        CMD_DELETE => users_action::Args::Delete {
            id: id(sub)?,
            confirmed: sub.get_flag(ARG_YES),
        },
        other => return Err(anyhow!("unknown users subcommand: {other}")),
    })
}

fn profile_args(matches: &ArgMatches) -> Result<profile_action::Args> {
    let (name, sub) = matches
        .subcommand()
        .context("missing profile subcommand, see --help")?;
    Ok(match name {
        CMD_SHOW => profile_action::Args::Show,
        CMD_UPDATE => profile_action::Args::Update(profile_action::ProfileChanges {
            name: optional(sub, profile::ARG_NAME),
            email: optional(sub, profile::ARG_EMAIL),
            alamat: sub.get_one::<String>(profile::ARG_ALAMAT).cloned(),
            kota: sub.get_one::<String>(profile::ARG_KOTA).cloned(),
        }),
        profile::CMD_CHANGE_PASSWORD => profile_action::Args::ChangePassword(PasswordChange {
            current_password: secret(sub, profile::ARG_CURRENT_PASSWORD)?,
            new_password: secret(sub, profile::ARG_NEW_PASSWORD)?,
            new_password_confirmation: secret(sub, profile::ARG_NEW_PASSWORD_CONFIRMATION)?,
        }),
        CMD_DELETE => profile_action::Args::Delete {
            password: secret(sub, profile::ARG_PASSWORD)?,
            confirmed: sub.get_flag(ARG_YES),
        },
        profile::CMD_STATS => profile_action::Args::Stats,
        other => return Err(anyhow!("unknown profile subcommand: {other}")),
    })
}

fn string(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

/// Non-blank value, if given.
fn optional(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .filter(|value| !value.trim().is_empty())
        .cloned()
}

fn secret(matches: &ArgMatches, id: &str) -> Result<SecretString> {
    string(matches, id).map(SecretString::from)
}

fn id(matches: &ArgMatches) -> Result<u64> {
    matches
        .get_one::<u64>(ARG_ID)
        .copied()
        .context("missing required argument: <id>")
}

fn ids(matches: &ArgMatches, id: &str) -> Vec<u64> {
    matches
        .get_many::<u64>(id)
        .map(|values| values.copied().collect())
        .unwrap_or_default()
}

fn paging(matches: &ArgMatches) -> Option<Paging> {
    let page = matches.get_one::<u32>(ARG_PAGE).copied()?;
    let per_page = matches
        .get_one::<u32>(ARG_PER_PAGE)
        .copied()
        .unwrap_or(DEFAULT_PER_PAGE);
    Some(Paging {
        page: usize::try_from(page).ok()?,
        per_page: usize::try_from(per_page).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("SISWA_API_URL", None::<&str>),
                ("SISWA_TIMEOUT", None::<&str>),
                ("SISWA_TOKEN_FILE", Some("/tmp/siswa-test-token")),
                ("SISWA_PASSWORD", None::<&str>),
                ("SISWA_JSON", None::<&str>),
            ],
            || {
                let matches = commands::new().try_get_matches_from(args.iter().copied())?;
                handler(&matches)
            },
        )
    }

    #[test]
    fn dashboard_uses_defaults() -> Result<()> {
        let Action::Dashboard(globals) = dispatch(&["siswa", "dashboard"])? else {
            anyhow::bail!("expected dashboard action");
        };
        assert_eq!(globals.api.base_url, "http://localhost:8000/api");
        assert_eq!(globals.api.timeout, Duration::from_secs(10));
        assert_eq!(globals.token_file.to_string_lossy(), "/tmp/siswa-test-token");
        assert!(!globals.json);
        Ok(())
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let result = dispatch(&["siswa", "--api-url", "ftp://example.com", "dashboard"]);
        assert!(result.is_err());
    }

    #[test]
    fn login_carries_secret_password() -> Result<()> {
        let Action::Auth(_, auth_action::Args::Login(input)) = dispatch(&[
            "siswa",
            "login",
            "--email",
            "admin@sekolah.id",
            "--password",
            "Rahasia123",
        ])?
        else {
            anyhow::bail!("expected login action");
        };
        assert_eq!(input.email, "admin@sekolah.id");
        assert_eq!(input.password.expose_secret(), "Rahasia123");
        assert!(!format!("{input:?}").contains("Rahasia123"));
        Ok(())
    }

    #[test]
    fn students_list_filters_and_pages() -> Result<()> {
        let Action::Students(globals, students_action::Args::List { filter, paging }) = dispatch(&[
            "siswa", "--json", "students", "list", "--search", "budi", "--hobby", "2", "--page",
            "3",
        ])?
        else {
            anyhow::bail!("expected students list action");
        };
        assert!(globals.json);
        assert_eq!(filter.search, "budi");
        assert_eq!(filter.hobby, Some(2));
        assert_eq!(
            paging,
            Some(Paging {
                page: 3,
                per_page: 10
            })
        );
        Ok(())
    }

    #[test]
    fn students_update_only_sets_given_fields() -> Result<()> {
        let Action::Students(_, students_action::Args::Update { id, changes }) = dispatch(&[
            "siswa",
            "students",
            "update",
            "7",
            "--phone",
            "089876543210",
            "--toggle-hobby",
            "4",
        ])?
        else {
            anyhow::bail!("expected students update action");
        };
        assert_eq!(id, 7);
        assert_eq!(changes.phone.as_deref(), Some("089876543210"));
        assert_eq!(changes.name, None);
        assert_eq!(changes.hobbies, None);
        assert_eq!(changes.toggle_hobbies, vec![4]);
        Ok(())
    }

    #[test]
    fn delete_records_confirmation() -> Result<()> {
        let Action::Hobbies(_, hobbies_action::Args::Delete { id, confirmed }) =
            dispatch(&["siswa", "hobbies", "delete", "3"])?
        else {
            anyhow::bail!("expected hobbies delete action");
        };
        assert_eq!(id, 3);
        assert!(!confirmed);
        Ok(())
    }

    #[test]
    fn users_search_defaults_to_first_page() -> Result<()> {
        let Action::Users(_, users_action::Args::Search { query, page }) =
            dispatch(&["siswa", "users", "search", "budi"])?
        else {
            anyhow::bail!("expected users search action");
        };
        assert_eq!(query, "budi");
        assert_eq!(page, 1);
        Ok(())
    }

    #[test]
    fn profile_update_keeps_empty_city() -> Result<()> {
        let Action::Profile(_, profile_action::Args::Update(changes)) =
            dispatch(&["siswa", "profile", "update", "--kota", ""])?
        else {
            anyhow::bail!("expected profile update action");
        };
        assert_eq!(changes.kota.as_deref(), Some(""));
        assert_eq!(changes.alamat, None);
        Ok(())
    }

    #[test]
    fn email_verify_link() -> Result<()> {
        let Action::Auth(_, auth_action::Args::VerifyEmailLink { id, hash }) =
            dispatch(&["siswa", "email", "verify-link", "5", "abc123"])?
        else {
            anyhow::bail!("expected verify-link action");
        };
        assert_eq!(id, "5");
        assert_eq!(hash, "abc123");
        Ok(())
    }
}
