use super::{id_arg, list_args, yes_arg, CMD_CREATE, CMD_DELETE, CMD_LIST, CMD_UPDATE};
use clap::{Arg, Command};

pub const CMD_HOBBIES: &str = "hobbies";
pub const ARG_NAME: &str = "name";

fn name_arg() -> Arg {
    Arg::new(ARG_NAME).help("Hobby name").required(true)
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_HOBBIES)
        .about("Manage hobbies")
        .visible_alias("hobby")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(list_args(Command::new(CMD_LIST).about("List hobbies")))
        .subcommand(Command::new(CMD_CREATE).about("Add a hobby").arg(name_arg()))
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Rename a hobby")
                .arg(id_arg())
                .arg(name_arg()),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a hobby")
                .arg(id_arg())
                .arg(yes_arg()),
        )
}
