use std::process::ExitCode;

use clap::Parser;
use exprmig::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    exprmig::logging::init_logging(args.verbose());

    match exprmig::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
