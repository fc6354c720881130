//! dbcmd - command-line client for the dbd configuration database.
//!
//! Runs one command in local mode: opens the database described by the
//! configuration file, executes the command, then closes the database so
//! any change is written back to the origin files.
//!
//! ```text
//! dbcmd read /hostname
//! dbcmd write /settings/net/ip 10.0.0.2
//! dbcmd --config /etc/dbd/dbd.toml list /vms
//! ```

mod commands;
mod format;
mod parse;

use std::process;

use clap::ArgMatches;
use dbd_executor::Dbd;
use tracing::Level;

use commands::build_cli;
use format::{format_error, format_output, OutputMode};
use parse::matches_to_command;

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Plain
    };

    process::exit(run(&matches, mode));
}

fn run(matches: &ArgMatches, mode: OutputMode) -> i32 {
    let cmd = match matches_to_command(matches) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{}", e);
            return 2;
        }
    };
    let method = cmd.method_name();

    let config = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(dbd_executor::DEFAULT_CONFIG_PATH);
    let db = match Dbd::open_file(config) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("DB connection error: {}", e);
            return 1;
        }
    };

    let mut code = match db.executor().execute(cmd) {
        Ok(output) => {
            let formatted = format_output(&output, mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(method, &e, mode));
            1
        }
    };

    let report = db.close();
    if report.flush_failures > 0 {
        eprintln!(
            "DB close error: {} document(s) could not be written back",
            report.flush_failures
        );
        code = 1;
    }
    code
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
