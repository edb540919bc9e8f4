use std::{io::BufRead, process::ExitCode};

use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing::{debug, trace};
use tracing_subscriber::{filter, prelude::*};

fn cli() -> clap::Command {
    Command::new("mod3")
        .about("Computes the remainder modulo three of a binary number with a finite automaton")
        .arg(
            Arg::new("in")
                .long("in")
                .value_name("BINARY")
                .help("binary string to evaluate (default: read one line from stdin)"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .action(ArgAction::SetTrue)
                .help("print the transition table of the automaton to stderr"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_line() -> std::io::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if matches.get_flag("table") {
        match fsm::mod_three::machine() {
            Ok(dfa) => eprintln!("{dfa}"),
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                return ExitCode::from(1);
            }
        }
    }

    let input = match matches.get_one::<String>("in") {
        Some(input) if !input.is_empty() => input.clone(),
        _ => {
            debug!("reading input from stdin");
            match read_line() {
                Ok(line) => line,
                Err(e) => {
                    eprintln!("{} {e}", "read error:".red().bold());
                    return ExitCode::from(2);
                }
            }
        }
    };

    match fsm::mod_three::mod_three(&input) {
        Ok(remainder) => {
            debug!("{input:?} leaves remainder {remainder}");
            println!("{remainder}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}
