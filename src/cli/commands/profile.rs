use super::{yes_arg, CMD_DELETE, CMD_SHOW, CMD_UPDATE};
use clap::{Arg, Command};

pub const CMD_PROFILE: &str = "profile";
pub const CMD_CHANGE_PASSWORD: &str = "change-password";
pub const CMD_STATS: &str = "stats";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_ALAMAT: &str = "alamat";
pub const ARG_KOTA: &str = "kota";
pub const ARG_CURRENT_PASSWORD: &str = "current-password";
pub const ARG_NEW_PASSWORD: &str = "new-password";
pub const ARG_NEW_PASSWORD_CONFIRMATION: &str = "new-password-confirmation";
pub const ARG_PASSWORD: &str = "password";

fn secret_arg(id: &'static str, help: &'static str, env: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .env(env)
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_PROFILE)
        .about("The signed-in user's own profile")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_SHOW).about("Show the profile"))
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Edit the profile; omitted fields keep their current value")
                .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("Full name"))
                .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("Email address"))
                .arg(
                    Arg::new(ARG_ALAMAT)
                        .long(ARG_ALAMAT)
                        .visible_alias("address")
                        .help("Address, empty to clear"),
                )
                .arg(
                    Arg::new(ARG_KOTA)
                        .long(ARG_KOTA)
                        .visible_alias("city")
                        .help("City, empty to clear"),
                ),
        )
        .subcommand(
            Command::new(CMD_CHANGE_PASSWORD)
                .about("Change the password")
                .arg(secret_arg(
                    ARG_CURRENT_PASSWORD,
                    "Current password",
                    "SISWA_CURRENT_PASSWORD",
                ))
                .arg(secret_arg(
                    ARG_NEW_PASSWORD,
                    "New password",
                    "SISWA_NEW_PASSWORD",
                ))
                .arg(secret_arg(
                    ARG_NEW_PASSWORD_CONFIRMATION,
                    "Repeat the new password",
                    "SISWA_NEW_PASSWORD_CONFIRMATION",
                )),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete the account; this cannot be undone")
                .arg(secret_arg(
                    ARG_PASSWORD,
                    "Current password",
                    "SISWA_PASSWORD",
                ))
                .arg(yes_arg()),
        )
        .subcommand(Command::new(CMD_STATS).about("Show account statistics"))
}
