use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_FORGOT_PASSWORD: &str = "forgot-password";
pub const CMD_RESET_PASSWORD: &str = "reset-password";
pub const CMD_EMAIL: &str = "email";

pub const CMD_EMAIL_SEND: &str = "send-verification";
pub const CMD_EMAIL_VERIFY: &str = "verify";
pub const CMD_EMAIL_VERIFY_LINK: &str = "verify-link";
pub const CMD_EMAIL_RESEND: &str = "resend";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_PASSWORD_CONFIRMATION: &str = "password-confirmation";
pub const ARG_RESET_TOKEN: &str = "reset-token";
pub const ARG_ID: &str = "id";
pub const ARG_HASH: &str = "hash";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .long(ARG_EMAIL)
        .help("Account email")
        .env("SISWA_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("SISWA_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn confirmation_arg() -> Arg {
    Arg::new(ARG_PASSWORD_CONFIRMATION)
        .long(ARG_PASSWORD_CONFIRMATION)
        .help("Repeat the password")
        .env("SISWA_PASSWORD_CONFIRMATION")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_LOGIN)
            .about("Sign in and store the API token")
            .arg(email_arg())
            .arg(password_arg()),
        Command::new(CMD_REGISTER)
            .about("Create an account and store the API token")
            .arg(
                Arg::new(ARG_NAME)
                    .long(ARG_NAME)
                    .help("Full name")
                    .required(true),
            )
            .arg(email_arg())
            .arg(password_arg())
            .arg(confirmation_arg()),
        Command::new(CMD_LOGOUT).about("Sign out and forget the stored token"),
        Command::new(CMD_WHOAMI)
            .about("Show the signed-in user; a token the server rejects is removed"),
        Command::new(CMD_FORGOT_PASSWORD)
            .about("Send a password reset email")
            .arg(email_arg()),
        Command::new(CMD_RESET_PASSWORD)
            .about("Set a new password with the token from the reset email")
            .arg(
                Arg::new(ARG_RESET_TOKEN)
                    .long(ARG_RESET_TOKEN)
                    .help("Token from the password reset email")
                    .env("SISWA_RESET_TOKEN")
                    .hide_env_values(true)
                    .required(true),
            )
            .arg(email_arg())
            .arg(password_arg())
            .arg(confirmation_arg()),
        Command::new(CMD_EMAIL)
            .about("Email verification")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(Command::new(CMD_EMAIL_SEND).about("Send the verification email"))
            .subcommand(Command::new(CMD_EMAIL_VERIFY).about("Mark the email as verified"))
            .subcommand(
                Command::new(CMD_EMAIL_VERIFY_LINK)
                    .about("Follow the link from a verification email")
                    .arg(Arg::new(ARG_ID).help("User id from the link").required(true))
                    .arg(Arg::new(ARG_HASH).help("Hash from the link").required(true)),
            )
            .subcommand(Command::new(CMD_EMAIL_RESEND).about("Resend the verification email")),
    ]
}
