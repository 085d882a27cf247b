use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Reads the process arguments, installs the stderr logger at the level the
/// `-v` count or `SISWA_LOG_LEVEL` asks for, then resolves the subcommand.
///
/// Help, version and usage errors exit the process from inside clap.
///
/// # Errors
///
/// Returns an error if the logger cannot be installed, the API URL is invalid
/// or a required argument is missing.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity = matches
        .get_one::<u8>(commands::ARG_VERBOSITY)
        .copied()
        .unwrap_or_default();
    telemetry::init(telemetry::level(verbosity))?;

    dispatch::handler(&matches)
}
