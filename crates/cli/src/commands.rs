//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};
use dbd_executor::DEFAULT_CONFIG_PATH;

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("dbcmd")
        .about("Query and edit the host configuration database")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Database configuration file (.json or .toml)")
                .default_value(DEFAULT_CONFIG_PATH)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log to stderr (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("read")
                .about("Retrieve <key> from db")
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("write")
                .about("Store <value> for <key> in the db")
                .arg(key_arg())
                .arg(Arg::new("value").required(true).help("Value to store")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete <key> from db")
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("exists")
                .about("Check if <key> exists in the db")
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Print the JSON subtree under <key>")
                .arg(optional_key_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List the children of <key>")
                .arg(optional_key_arg()),
        )
        .subcommand(
            Command::new("inject")
                .about("Store a JSON <value> at <key>")
                .arg(key_arg())
                .arg(Arg::new("value").required(true).help("JSON text to store")),
        )
}

fn key_arg() -> Arg {
    Arg::new("key")
        .required(true)
        .help("Logical path, e.g. /settings/net/ip")
}

fn optional_key_arg() -> Arg {
    Arg::new("key")
        .default_value("/")
        .help("Logical path (default: /)")
}
