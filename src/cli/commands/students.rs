use super::{id_arg, list_args, yes_arg, CMD_CREATE, CMD_DELETE, CMD_LIST, CMD_SHOW, CMD_UPDATE};
use clap::{Arg, ArgAction, Command};

pub const CMD_STUDENTS: &str = "students";

pub const ARG_NAME: &str = "name";
pub const ARG_PHONE: &str = "phone";
pub const ARG_NISN: &str = "nisn";
pub const ARG_HOBBY: &str = "hobby";
pub const ARG_TOGGLE_HOBBY: &str = "toggle-hobby";
pub const ARG_FILTER_HOBBY: &str = "filter-hobby";

fn form_args(command: Command, required: bool) -> Command {
    command
        .arg(
            Arg::new(ARG_NAME)
                .long(ARG_NAME)
                .help("Student name")
                .required(required),
        )
        .arg(
            Arg::new(ARG_PHONE)
                .long(ARG_PHONE)
                .help("Phone number, at least 10 digits")
                .required(required),
        )
        .arg(
            Arg::new(ARG_NISN)
                .long(ARG_NISN)
                .help("National student number (NISN)")
                .required(required),
        )
        .arg(
            Arg::new(ARG_HOBBY)
                .long(ARG_HOBBY)
                .help("Hobby id, repeat for several hobbies")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(u64))
                .required(required),
        )
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_STUDENTS)
        .about("Manage students")
        .visible_alias("siswa")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            list_args(Command::new(CMD_LIST).about("List students")).arg(
                Arg::new(ARG_FILTER_HOBBY)
                    .long(ARG_HOBBY)
                    .help("Only students with this hobby id")
                    .value_parser(clap::value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new(CMD_SHOW)
                .about("Show one student")
                .arg(id_arg()),
        )
        .subcommand(form_args(
            Command::new(CMD_CREATE).about("Add a student"),
            true,
        ))
        .subcommand(
            form_args(
                Command::new(CMD_UPDATE)
                    .about("Edit a student; omitted fields keep their current value")
                    .arg(id_arg()),
                false,
            )
            .arg(
                Arg::new(ARG_TOGGLE_HOBBY)
                    .long(ARG_TOGGLE_HOBBY)
                    .help("Add or remove a hobby id, repeatable")
                    .action(ArgAction::Append)
                    .value_parser(clap::value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a student")
                .arg(id_arg())
                .arg(yes_arg()),
        )
}
