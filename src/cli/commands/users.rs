use super::{
    id_arg, page_arg, yes_arg, CMD_CREATE, CMD_DELETE, CMD_LIST, CMD_SHOW, CMD_UPDATE,
};
use clap::{Arg, Command};

pub const CMD_USERS: &str = "users";
pub const CMD_SEARCH: &str = "search";

pub const ARG_QUERY: &str = "query";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_PASSWORD_CONFIRMATION: &str = "password-confirmation";

fn form_args(command: Command, creating: bool) -> Command {
    command
        .arg(
            Arg::new(ARG_NAME)
                .long(ARG_NAME)
                .help("Full name")
                .required(creating),
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Email address")
                .required(creating),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help(if creating {
                    "Password"
                } else {
                    "New password; leave out to keep the current one"
                })
                .required(creating),
        )
        .arg(
            Arg::new(ARG_PASSWORD_CONFIRMATION)
                .long(ARG_PASSWORD_CONFIRMATION)
                .help("Repeat the password")
                .required(creating),
        )
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_USERS)
        .about("Manage system users")
        .visible_alias("user")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_LIST)
                .about("List users, one server page at a time")
                .arg(page_arg()),
        )
        .subcommand(
            Command::new(CMD_SEARCH)
                .about("Search users by name or email")
                .arg(Arg::new(ARG_QUERY).help("Search text").required(true))
                .arg(page_arg()),
        )
        .subcommand(Command::new(CMD_SHOW).about("Show one user").arg(id_arg()))
        .subcommand(form_args(
            Command::new(CMD_CREATE).about("Add a user"),
            true,
        ))
        .subcommand(form_args(
            Command::new(CMD_UPDATE)
                .about("Edit a user; omitted fields keep their current value")
                .arg(id_arg()),
            false,
        ))
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a user")
                .arg(id_arg())
                .arg(yes_arg()),
        )
}
