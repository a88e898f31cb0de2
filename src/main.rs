use std::process::ExitCode;

use clap::Parser;

mod error;
mod kubernetes;

use kubernetes::remove;

/// remove pods
#[derive(Parser, Debug)]
#[command(name = "remove", version, long_about = None)]
struct Args {
    #[command(flatten)]
    command: remove::CommandArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    configure_logger(args.command.verbosity);

    match remove::handle(args.command) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn configure_logger(verbosity: u8) {
    let mut clog = colog::default_builder();
    let log_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    clog.filter(None, log_level);
    clog.init();
}
