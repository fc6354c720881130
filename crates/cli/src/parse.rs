//! ArgMatches → Command conversion.
//!
//! Subcommand names are the bus method names, so each subcommand becomes
//! a `Command` through the same path a transport would use.

use clap::ArgMatches;
use dbd_executor::{Command, Error};

/// Translate the chosen subcommand into a command.
pub fn matches_to_command(matches: &ArgMatches) -> Result<Command, Error> {
    let Some((name, sub)) = matches.subcommand() else {
        return Err(Error::Transport {
            reason: "no command given".into(),
        });
    };

    let args: Vec<String> = ["key", "value"]
        .into_iter()
        .filter_map(|id| sub.try_get_one::<String>(id).ok().flatten().cloned())
        .collect();

    Command::from_method(name, &args)
}
