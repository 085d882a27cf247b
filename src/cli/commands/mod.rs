pub mod api;
pub mod auth;
pub mod hobbies;
pub mod profile;
pub mod students;
pub mod users;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const CMD_DASHBOARD: &str = "dashboard";
pub const CMD_PHONES: &str = "phones";

pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_CREATE: &str = "create";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";

pub const ARG_ID: &str = "id";
pub const ARG_YES: &str = "yes";
pub const ARG_SEARCH: &str = "search";
pub const ARG_PAGE: &str = "page";
pub const ARG_PER_PAGE: &str = "per-page";
pub const ARG_VERBOSITY: &str = "verbosity";

pub const DEFAULT_PER_PAGE: u32 = 10;

/// Names accepted by `SISWA_LOG_LEVEL`; the index is the matching `-v` count.
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn parse_log_level(value: &str) -> Result<u8, String> {
    let value = value.trim();
    LOG_LEVELS
        .iter()
        .position(|level| level.eq_ignore_ascii_case(value))
        .and_then(|index| u8::try_from(index).ok())
        .or_else(|| {
            value
                .parse::<u8>()
                .ok()
                .filter(|count| usize::from(*count) < LOG_LEVELS.len())
        })
        .ok_or_else(|| format!("expected one of {} or 0-4", LOG_LEVELS.join(", ")))
}

/// `-v` repeated raises the stderr log level; `SISWA_LOG_LEVEL` takes a name.
fn verbosity_arg() -> Arg {
    Arg::new(ARG_VERBOSITY)
        .short('v')
        .long("verbose")
        .help("Log more on stderr: -v warn, -vv info, -vvv debug, -vvvv trace")
        .env("SISWA_LOG_LEVEL")
        .global(true)
        .action(ArgAction::Count)
        .value_parser(parse_log_level)
}

pub(crate) fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Record id")
        .required(true)
        .value_parser(clap::value_parser!(u64))
}

pub(crate) fn yes_arg() -> Arg {
    Arg::new(ARG_YES)
        .long(ARG_YES)
        .short('y')
        .help("Confirm the deletion")
        .action(ArgAction::SetTrue)
}

pub(crate) fn page_arg() -> Arg {
    Arg::new(ARG_PAGE)
        .long(ARG_PAGE)
        .help("Page number, starting at 1")
        .default_value("1")
        .value_parser(clap::value_parser!(u32).range(1..))
}

/// Name search plus optional client-side pagination.
pub(crate) fn list_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SEARCH)
                .long(ARG_SEARCH)
                .short('s')
                .help("Case-insensitive name search"),
        )
        .arg(
            Arg::new(ARG_PAGE)
                .long(ARG_PAGE)
                .help("Show only this page, starting at 1")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_PER_PAGE)
                .long(ARG_PER_PAGE)
                .help("Rows per page when --page is set")
                .default_value("10")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("siswa")
        .about("Student Management System client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(auth::subcommands())
        .subcommand(Command::new(CMD_DASHBOARD).about("Show record counts"))
        .subcommand(students::subcommand())
        .subcommand(hobbies::subcommand())
        .subcommand(
            Command::new(CMD_PHONES)
                .about("List phone numbers")
                .visible_alias("phone")
                .arg(
                    Arg::new(ARG_PAGE)
                        .long(ARG_PAGE)
                        .help("Show only this page, starting at 1")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new(ARG_PER_PAGE)
                        .long(ARG_PER_PAGE)
                        .help("Rows per page when --page is set")
                        .default_value("10")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(users::subcommand())
        .subcommand(profile::subcommand())
        .arg(verbosity_arg());

    api::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "siswa");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Student Management System client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_command_is_consistent() {
        new().debug_assert();
    }

    #[test]
    fn test_global_defaults() {
        temp_env::with_vars(
            [
                ("SISWA_API_URL", None::<&str>),
                ("SISWA_TIMEOUT", None::<&str>),
                ("SISWA_JSON", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from(vec!["siswa", "dashboard"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_URL).cloned(),
                    Some("http://localhost:8000/api".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(10));
                assert!(!matches.get_flag(api::ARG_JSON));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SISWA_API_URL", Some("https://sekolah.example/api")),
                ("SISWA_TOKEN_FILE", Some("/tmp/siswa-token")),
                ("SISWA_TIMEOUT", Some("30")),
                ("SISWA_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["siswa", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_URL).cloned(),
                    Some("https://sekolah.example/api".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_TOKEN_FILE).cloned(),
                    Some("/tmp/siswa-token".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("SISWA_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["siswa", "dashboard"]);
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("SISWA_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["siswa".to_string(), "dashboard".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }
                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), Ok(3));
        assert_eq!(parse_log_level(" warn "), Ok(1));
        assert_eq!(parse_log_level("4"), Ok(4));
        assert!(parse_log_level("5").is_err());
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_students_create_requires_fields() {
        let result = new().try_get_matches_from(vec!["siswa", "students", "create", "--name", "Budi"]);
        assert_eq!(
            result.map_err(|e| e.kind()).err(),
            Some(clap::error::ErrorKind::MissingRequiredArgument)
        );
    }

    #[test]
    fn test_students_create_collects_hobbies() -> Result<(), Box<dyn std::error::Error>> {
        let matches = new().try_get_matches_from(vec![
            "siswa",
            "students",
            "create",
            "--name",
            "Budi",
            "--phone",
            "081234567890",
            "--nisn",
            "0051234567",
            "--hobby",
            "1",
            "--hobby",
            "3",
        ])?;
        let (_, students) = matches.subcommand().ok_or("no subcommand")?;
        let (_, create) = students.subcommand().ok_or("no subcommand")?;
        let hobbies: Vec<u64> = create
            .get_many::<u64>(students::ARG_HOBBY)
            .ok_or("no hobbies")?
            .copied()
            .collect();
        assert_eq!(hobbies, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = new().try_get_matches_from(vec!["siswa", "--timeout", "0", "dashboard"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_password_from_env() {
        temp_env::with_vars([("SISWA_PASSWORD", Some("Rahasia123"))], || {
            let result = new().try_get_matches_from(vec![
                "siswa",
                "login",
                "--email",
                "admin@sekolah.id",
            ]);
            assert!(result.is_ok());
        });
    }
}
