//! edt: compile and inspect search requests from the command line.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use elastic_dev_tools::cli::{EdtArgs, execute_command};

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let args = EdtArgs::parse();

    // RUST_LOG, when set, refines the level chosen by -v / -q.
    Builder::new()
        .filter_level(log_level(args.verbosity()))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("edt: {e}");
        process::exit(1);
    }
}
